use crate::codegen::classification::{Classification, FloatKind, LoweredType};
use crate::type_store::{TypeId, TypeStore};

// Argument and result classification for the Procedure Call Standard for the
// Arm 64-bit Architecture:
// https://github.com/ARM-software/abi-aa/blob/main/aapcs64/aapcs64.rst
//
// Every operation is a pure function of the queried type. Callers must only
// hand over concrete types, and each argument of a call is classified on its
// own: no register budget is tracked across an argument list.

// > An Homogeneous Floating-point Aggregate (HFA) is an Homogeneous Aggregate
// > with a Fundamental Data Type that is a Floating-Point type and at most
// > four uniquely addressable members.
//
// Returns the member count, zero meaning the type is no such aggregate. The
// language has no short vector types so the HVA flavor never applies and the
// fundamental data type is always one of the three float kinds.
pub fn homogeneous_aggregate_member_count(type_store: &TypeStore, type_id: TypeId) -> usize {
	let members = type_store.field_count(type_id);
	if members < 1 || members > 4 {
		return 0;
	}

	let first_field = type_store.field_type(type_id, 0);
	if float_kind(type_store, first_field).is_none() {
		return 0;
	}

	// Every remaining member must be identically the first member's type, a
	// mix of float widths disqualifies the aggregate.
	for field_index in 1..members {
		if !type_store.direct_match(first_field, type_store.field_type(type_id, field_index)) {
			return 0;
		}
	}

	members
}

pub fn must_pass_by_reference(type_store: &TypeStore, type_id: TypeId) -> bool {
	// B.2: an HFA or HVA is used unmodified no matter its size.
	if homogeneous_aggregate_member_count(type_store, type_id) > 0 {
		return false;
	}

	// B.3: a composite type larger than 16 bytes is copied to memory
	// allocated by the caller and the argument replaced by a pointer to the
	// copy. Fieldless types of any size are not composite and stay direct.
	type_store.field_count(type_id) > 0 && type_store.type_layout(type_id).size > 16
}

pub fn classify_type(type_store: &TypeStore, type_id: TypeId) -> Classification {
	let _zone = zone!("aarch64 classify type");

	// C.1: half, single, and double precision floats are allocated to the
	// least significant bits of a SIMD and floating-point register. Quad
	// precision and short vector types are absent from the language.
	if float_kind(type_store, type_id).is_some() {
		return Classification { in_float_registers: true, passed_indirectly: false, needs_rewrite: false };
	}

	// C.2: an HFA or HVA takes one SIMD and floating-point register per
	// member and is rewritten to `[members x ftype]` for the code generator.
	if homogeneous_aggregate_member_count(type_store, type_id) > 0 {
		return Classification { in_float_registers: true, passed_indirectly: false, needs_rewrite: true };
	}

	// The B.3 by-reference rule is applied after C.2 so the homogeneous
	// aggregate walk only runs once.
	if must_pass_by_reference(type_store, type_id) {
		return Classification { in_float_registers: false, passed_indirectly: true, needs_rewrite: false };
	}

	// C.7 and C.9: integral and pointer values of a machine size are copied
	// into general purpose registers as-is. Any fieldless bits type of the
	// right size counts, an opaque handle travels like the pointer it wraps.
	let layout = type_store.type_layout(type_id);
	if type_id.is_primitive_bits(type_store) && matches!(layout.size, 1 | 2 | 4 | 8 | 16) {
		return Classification { in_float_registers: false, passed_indirectly: false, needs_rewrite: false };
	}

	// C.10: any composite type left over fits in at most two general purpose
	// registers (B.3 already routed everything larger to memory) and is
	// rewritten to `[n x i64]`.
	if type_store.field_count(type_id) > 0 {
		assert!(layout.size <= 16, "{layout:?}");
		return Classification { in_float_registers: false, passed_indirectly: false, needs_rewrite: true };
	}

	// C.15: only a fieldless bits type of an irregular size remains. It is
	// placed in a stack slot rather than copied behind a caller pointer,
	// even though the flag matches the B.3 outcome.
	Classification { in_float_registers: false, passed_indirectly: true, needs_rewrite: false }
}

// A result is returned in the registers an equivalent lone argument would
// occupy. When that argument would not fit in registers the caller instead
// provides storage and passes its address in x8.
pub fn requires_sret(type_store: &TypeStore, type_id: TypeId) -> bool {
	classify_type(type_store, type_id).passed_indirectly
}

// Some targets must defensively copy an argument before passing its address.
// The B.3 copy already lands in caller-owned memory so this target never
// needs another one.
pub fn needs_private_copy(_type_store: &TypeStore, _type_id: TypeId, _by_reference: bool) -> bool {
	false
}

pub fn lowered_type(type_store: &TypeStore, type_id: TypeId, classification: Classification) -> LoweredType {
	// A lone half precision float always gets its dedicated representation,
	// rewrite or not, so it can never be mistaken for an i16 downstream.
	if float_kind(type_store, type_id) == Some(FloatKind::F16) {
		return LoweredType::Float16;
	}

	if !classification.needs_rewrite {
		return LoweredType::Unchanged;
	}

	if classification.in_float_registers {
		// Only homogeneous aggregates reach here.
		let members = type_store.field_count(type_id);
		assert!(members >= 1 && members <= 4, "{members}");

		let first_field = type_store.field_type(type_id, 0);
		let Some(element) = float_kind(type_store, first_field) else {
			unreachable!("{first_field:?}");
		};

		return LoweredType::FloatArray { element, count: members as u8 };
	}

	let size = type_store.type_layout(type_id).size;
	assert!(size >= 1 && size <= 16, "{size}");
	LoweredType::Int64Array { count: ((size + 7) / 8) as u8 }
}

// The float check is an identity check against the three distinguished float
// entries. A type merely shaped like a float, such as a four byte opaque bits
// type, does not qualify.
fn float_kind(type_store: &TypeStore, type_id: TypeId) -> Option<FloatKind> {
	if type_store.direct_match(type_id, type_store.f16_type_id) {
		Some(FloatKind::F16)
	} else if type_store.direct_match(type_id, type_store.f32_type_id) {
		Some(FloatKind::F32)
	} else if type_store.direct_match(type_id, type_store.f64_type_id) {
		Some(FloatKind::F64)
	} else {
		None
	}
}
