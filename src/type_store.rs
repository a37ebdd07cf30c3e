use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy)]
pub struct TypeId {
	entry: u32,
}

impl TypeId {
	// True for builtins, pointers, and opaque bits types: fieldless immutable
	// values of a fixed size. User types are never primitive bits, even when
	// they have no fields.
	pub fn is_primitive_bits(self, type_store: &TypeStore) -> bool {
		let entry = type_store.type_entries[self.index()];
		match entry.kind {
			TypeEntryKind::BuiltinType { .. } | TypeEntryKind::Pointer { .. } | TypeEntryKind::BitsType { .. } => true,
			TypeEntryKind::UserType { .. } => false,
		}
	}

	pub fn index(self) -> usize {
		self.entry as usize
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
	pub size: i64,
	pub alignment: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
	I8,
	I16,
	I32,
	I64,

	U8,
	U16,
	U32,
	U64,

	ISize,
	USize,

	F16,
	F32,
	F64,
}

impl NumericKind {
	pub fn layout(self) -> Layout {
		match self {
			NumericKind::I8 => Layout { size: 1, alignment: 1 },
			NumericKind::I16 => Layout { size: 2, alignment: 2 },
			NumericKind::I32 => Layout { size: 4, alignment: 4 },
			NumericKind::I64 => Layout { size: 8, alignment: 8 },
			NumericKind::U8 => Layout { size: 1, alignment: 1 },
			NumericKind::U16 => Layout { size: 2, alignment: 2 },
			NumericKind::U32 => Layout { size: 4, alignment: 4 },
			NumericKind::U64 => Layout { size: 8, alignment: 8 },
			NumericKind::ISize => Layout { size: 8, alignment: 8 },
			NumericKind::USize => Layout { size: 8, alignment: 8 },
			NumericKind::F16 => Layout { size: 2, alignment: 2 },
			NumericKind::F32 => Layout { size: 4, alignment: 4 },
			NumericKind::F64 => Layout { size: 8, alignment: 8 },
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
	Bool,
	Numeric(NumericKind),
}

impl PrimitiveKind {
	pub fn layout(self) -> Layout {
		match self {
			PrimitiveKind::Bool => Layout { size: 1, alignment: 1 },
			PrimitiveKind::Numeric(numeric) => numeric.layout(),
		}
	}
}

#[derive(Debug, Clone, Copy)]
pub struct TypeEntry {
	pub kind: TypeEntryKind,
}

#[derive(Debug, Clone, Copy)]
pub enum TypeEntryKind {
	BuiltinType { kind: PrimitiveKind },
	UserType { shape_index: usize },
	Pointer { type_id: TypeId, mutable: bool },
	BitsType { size: i64 },
}

#[derive(Debug, Clone, Copy)]
pub struct UserType<'a> {
	pub name: &'a str,
	pub fields: &'a [Field<'a>],
	pub layout: Layout,
}

#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
	pub name: &'a str,
	pub type_id: TypeId,
}

// Registered names and field slices are borrowed for `'a` from an arena owned
// by the embedding frontend; the store itself allocates nothing for them.
// Registration requires `&mut self` while every query is `&self`, so a fully
// built store can be read from any number of threads at once.
#[derive(Debug)]
pub struct TypeStore<'a> {
	pub type_entries: Vec<TypeEntry>,
	pub user_types: Vec<UserType<'a>>,
	pointer_entries: FxHashMap<(u32, bool), TypeId>,

	pub bool_type_id: TypeId,

	pub i8_type_id: TypeId,
	pub i16_type_id: TypeId,
	pub i32_type_id: TypeId,
	pub i64_type_id: TypeId,

	pub u8_type_id: TypeId,
	pub u16_type_id: TypeId,
	pub u32_type_id: TypeId,
	pub u64_type_id: TypeId,

	pub isize_type_id: TypeId,
	pub usize_type_id: TypeId,

	pub f16_type_id: TypeId,
	pub f32_type_id: TypeId,
	pub f64_type_id: TypeId,
}

impl<'a> TypeStore<'a> {
	pub fn new() -> Self {
		let mut type_entries = Vec::new();

		let mut push_primitive = |kind| {
			let type_id = TypeId { entry: type_entries.len() as u32 };
			let kind = TypeEntryKind::BuiltinType { kind };
			type_entries.push(TypeEntry { kind });
			type_id
		};

		let bool_type_id = push_primitive(PrimitiveKind::Bool);

		let i8_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::I8));
		let i16_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::I16));
		let i32_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::I32));
		let i64_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::I64));

		let u8_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::U8));
		let u16_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::U16));
		let u32_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::U32));
		let u64_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::U64));

		let isize_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::ISize));
		let usize_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::USize));

		let f16_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::F16));
		let f32_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::F32));
		let f64_type_id = push_primitive(PrimitiveKind::Numeric(NumericKind::F64));

		TypeStore {
			type_entries,
			user_types: Vec::new(),
			pointer_entries: FxHashMap::default(),
			bool_type_id,
			i8_type_id,
			i16_type_id,
			i32_type_id,
			i64_type_id,
			u8_type_id,
			u16_type_id,
			u32_type_id,
			u64_type_id,
			isize_type_id,
			usize_type_id,
			f16_type_id,
			f32_type_id,
			f64_type_id,
		}
	}

	// Type identity is entry identity, two entries of the same shape are still
	// distinct types.
	pub fn direct_match(&self, a: TypeId, b: TypeId) -> bool {
		a.entry == b.entry
	}

	pub fn field_count(&self, type_id: TypeId) -> usize {
		let entry = self.type_entries[type_id.index()];
		match entry.kind {
			TypeEntryKind::UserType { shape_index } => self.user_types[shape_index].fields.len(),
			TypeEntryKind::BuiltinType { .. } | TypeEntryKind::Pointer { .. } | TypeEntryKind::BitsType { .. } => 0,
		}
	}

	pub fn field_type(&self, type_id: TypeId, field_index: usize) -> TypeId {
		let entry = self.type_entries[type_id.index()];
		match entry.kind {
			TypeEntryKind::UserType { shape_index } => self.user_types[shape_index].fields[field_index].type_id,
			kind => unreachable!("{kind:?}"),
		}
	}

	pub fn type_layout(&self, type_id: TypeId) -> Layout {
		match self.type_entries[type_id.index()].kind {
			TypeEntryKind::BuiltinType { kind } => kind.layout(),
			TypeEntryKind::UserType { shape_index } => self.user_types[shape_index].layout,
			TypeEntryKind::Pointer { .. } => Layout { size: 8, alignment: 8 },
			TypeEntryKind::BitsType { size } => Layout { size, alignment: bits_type_alignment(size) },
		}
	}

	pub fn register_struct(&mut self, name: &'a str, fields: &'a [Field<'a>]) -> TypeId {
		let mut size = 0;
		let mut alignment = 1;
		for field in fields {
			let field_layout = self.type_layout(field.type_id);

			if field_layout.alignment != 0 && size % field_layout.alignment != 0 {
				size = (size / field_layout.alignment) * field_layout.alignment + field_layout.alignment;
			}

			size += field_layout.size;
			alignment = alignment.max(field_layout.alignment);
		}

		if size != 0 && size % alignment != 0 {
			size = (size / alignment) * alignment + alignment;
		}

		let shape_index = self.user_types.len();
		let layout = Layout { size, alignment };
		self.user_types.push(UserType { name, fields, layout });

		let type_id = TypeId { entry: self.type_entries.len() as u32 };
		let kind = TypeEntryKind::UserType { shape_index };
		self.type_entries.push(TypeEntry { kind });
		type_id
	}

	pub fn register_bits_type(&mut self, size: i64) -> TypeId {
		assert!(size > 0, "{size}");

		let type_id = TypeId { entry: self.type_entries.len() as u32 };
		let kind = TypeEntryKind::BitsType { size };
		self.type_entries.push(TypeEntry { kind });
		type_id
	}

	pub fn pointer_to(&mut self, type_id: TypeId, mutable: bool) -> TypeId {
		if let Some(&existing) = self.pointer_entries.get(&(type_id.entry, mutable)) {
			return existing;
		}

		let pointer_type_id = TypeId { entry: self.type_entries.len() as u32 };
		let kind = TypeEntryKind::Pointer { type_id, mutable };
		self.type_entries.push(TypeEntry { kind });
		self.pointer_entries.insert((type_id.entry, mutable), pointer_type_id);
		pointer_type_id
	}
}

fn bits_type_alignment(size: i64) -> i64 {
	match size {
		1 | 2 | 4 | 8 | 16 => size,
		_ => 8,
	}
}
