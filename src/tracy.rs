// The tracy client itself is started and shut down by the embedding driver,
// a library only opens zones.

#[cfg(feature = "tracy-profile-zones")]
pub struct Zone {
	_span: tracy_client::Span,
}

#[cfg(feature = "tracy-profile-zones")]
impl Zone {
	pub fn new(span: tracy_client::Span) -> Zone {
		Zone { _span: span }
	}
}

#[cfg(feature = "tracy-profile-zones")]
macro_rules! zone {
	($name: literal) => {
		$crate::tracy::Zone::new(tracy_client::span!($name, 0))
	};
}

#[cfg(not(feature = "tracy-profile-zones"))]
macro_rules! zone {
	($name: literal) => {
		()
	};
}
