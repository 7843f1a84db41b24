use crate::atom::Atoms ;
use crate::object::ObjectBase ;



/// Body of a [`Method`].
///
/// Receives the component, the rest of its object (ports, attributes, host) and the
/// call's arguments. Arity checking is the body's business.
pub type MethodBody<C> = Box<dyn FnMut( &mut C, &mut ObjectBase<C>, &Atoms ) -> Atoms> ;

/// Structural callbacks whose signature is dictated by the host.
const HOST_MANAGED: [&str; 5] = [ "dsp64", "dblclick", "edclose", "okclose", "patchlineupdate" ];

/// How the host invokes a method.
#[derive( Copy, Clone, Debug, Eq, PartialEq, Hash, Default )]
pub enum CallingConvention {
	/// Arguments arrive as a list of atoms and a list of atoms is returned.
	#[default] Generic,
	/// The host calls this through its own fixed signature and bypasses the generic
	/// pathway.
	HostManaged,
}

impl std::fmt::Display for CallingConvention {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { match self {
		Self::Generic => write!( f, "generic" ),
		Self::HostManaged => write!( f, "host-managed" ),
	}}
}

/// Maps a declared method name to the name it is registered under, and the calling
/// convention the host expects for it.
///
/// ```
/// use object_link::{ canonical_method_name, CallingConvention };
/// assert_eq!( canonical_method_name( "integer" ), ( "int", CallingConvention::Generic ));
/// assert_eq!( canonical_method_name( "dsp64" ), ( "dsp64", CallingConvention::HostManaged ));
/// ```
pub fn canonical_method_name( name: &str ) -> ( &str, CallingConvention ) {
	match name {
		"integer" => ( "int", CallingConvention::Generic ),
		"number" => ( "float", CallingConvention::Generic ),
		name if HOST_MANAGED.contains( &name ) => ( name, CallingConvention::HostManaged ),
		name => ( name, CallingConvention::Generic ),
	}
}

/// A named operation registered on an object.
pub struct Method<C> {
	name: String,
	convention: CallingConvention,
	/// Vacated while the body runs
	body: Option<MethodBody<C>>,
}

impl<C> Method<C> {

	pub(crate) fn new( name: &str, body: MethodBody<C> ) -> Self {
		let ( name, convention ) = canonical_method_name( name );
		Self { name: name.to_string(), convention, body: Some( body ) }
	}

	/// The canonical name this method is registered under.
	#[inline] pub fn name( &self ) -> &str { &self.name }

	#[inline] pub fn convention( &self ) -> CallingConvention { self.convention }

	pub(crate) fn take_body( &mut self ) -> Option<MethodBody<C>> { self.body.take() }

	/// Puts `body` back unless the slot was refilled while it was out.
	pub(crate) fn restore_body( &mut self, body: MethodBody<C> ) {
		if self.body.is_none() { self.body = Some( body ) }
	}

}

impl<C> std::fmt::Debug for Method<C> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "Method" )
			.field( "name", &self.name )
			.field( "convention", &self.convention )
			.field( "body", &self.body.as_ref().map(| _ | "<closure>" ))
			.finish()
	}
}

#[cfg( test )]
mod tests {

	use std::rc::Rc ;
	use super::* ;

	fn body( marker: &Rc<()> ) -> MethodBody<()> {
		let marker = Rc::clone( marker );
		Box::new( move | _: &mut (), _: &mut ObjectBase<()>, _: &Atoms | { let _ = &marker ; Atoms::new() })
	}

	#[test]
	fn restore_keeps_refilled_slot() {
		let ( original, replacement ) = ( Rc::new(()), Rc::new(()) );
		let mut method = Method::new( "bang", body( &original ));

		let taken = method.take_body().expect( "body missing" );
		method.body = Some( body( &replacement ));
		method.restore_body( taken );

		assert_eq!( Rc::strong_count( &original ), 1 );
		assert_eq!( Rc::strong_count( &replacement ), 2 );
	}

	#[test]
	fn restore_fills_vacated_slot() {
		let original = Rc::new(());
		let mut method = Method::new( "number", body( &original ));

		let taken = method.take_body().expect( "body missing" );
		assert_eq!( Rc::strong_count( &original ), 2 );
		method.restore_body( taken );

		assert!( method.take_body().is_some() );
		assert_eq!( method.name(), "float" );
	}

}
