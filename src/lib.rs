//! Declaration-time registration and name-indexed dispatch for host-addressed
//! components.
//!
//! A component is an ordinary Rust type. While it is constructed it declares its
//! **ports**, **methods** and **attributes** on an [`ObjectBase`]. After construction a
//! host environment that only knows names and atoms can drive it: call a method by
//! name, get or set an attribute by name, route a message to inlet N, and receive
//! whatever the component sends from its outlets.
//!
//! # Core Concepts
//!
//! - [`Atom`] / [`Atoms`]: The host's value type. A tagged integer, float or interned
//! 	[`Symbol`], and an ordered list of them. Every value crossing the boundary is
//! 	[`Atoms`].
//!
//! - [`Host`]: Everything the runtime needs from the host, as a trait. Object
//! 	allocation, message entry points and the signal scheduler stay on the host side.
//!
//! - [`Component`]: Implemented by the user's type. Declares members in
//! 	[`Component::construct`], the only place they can be declared, and picks a
//! 	[`Layout`] at compile time:
//! 	- [`Standard`] - message objects; auxiliary inlets get host proxies
//! 	- [`Perform`] - vector signal processing
//! 	- [`Sample`] - per-sample signal processing
//! 	- [`Matrix`] - matrix processing; inlets are proxied like [`Standard`]
//!
//! - [`Wrapper`]: A constructed component in its layout. This is what the host holds.
//!
//! - **Methods**: Closures registered by name. [`Object::try_call`] calls them; an
//! 	unknown name yields an empty result rather than an error.
//!
//! - **Attributes**: Typed values registered by name with an optional label, range,
//! 	setter and getter ([`AttributeConfig`]). Setters and getters see the component. The component reads them natively through
//! 	an [`AttributeKey`]; the host reads and writes them as atoms through
//! 	[`bridge::attr_get`] and [`bridge::attr_set`].
//!
//! # Example
//!
//! ```
//! use std::rc::Rc ;
//! use object_link::{
//! 	atoms, Atom, Atoms, AttributeConfig, AttributeKey, Component, Host, HostError,
//! 	ObjectBase, ObjectError, ObjectHandle, OutletHandle, OutletId, ProxyHandle, AttributeObject,
//! 	Standard, Symbol, Wrapper,
//! };
//!
//! // A host that ignores everything. A real one forwards to the host's C API.
//! struct NullHost ;
//! impl Host for NullHost {
//! 	fn outlet_new( &self, _: ObjectHandle, _: &str ) -> OutletHandle { OutletHandle::new( 1 ) }
//! 	fn outlet_float( &self, _: OutletHandle, _: f64 ) -> Result<(), HostError> { Ok(()) }
//! 	fn outlet_anything( &self, _: OutletHandle, _: Symbol, _: &[Atom] ) -> Result<(), HostError> { Ok(()) }
//! 	fn proxy_new( &self, _: ObjectHandle, index: usize ) -> ProxyHandle { ProxyHandle::new( index ) }
//! 	fn proxy_getinlet( &self, _: ObjectHandle ) -> usize { 0 }
//! 	fn attr_touch( &self, _: ObjectHandle, _: Symbol ) {}
//! 	fn attribute_name( &self, _: AttributeObject ) -> Option<Symbol> { None }
//! 	fn dsp_setup( &self, _: ObjectHandle, _: usize ) {}
//! 	fn dsp_free( &self, _: ObjectHandle ) {}
//! }
//!
//! struct Scale { output: OutletId, factor: AttributeKey<f64>, changes: u32 }
//!
//! impl Component for Scale {
//! 	type Layout = Standard ;
//!
//! 	fn construct( object: &mut ObjectBase<Self>, _args: &Atoms ) -> Result<Self, ObjectError> {
//! 		object.inlet( "(number) value to scale", "" )?;
//! 		object.inlet( "(number) factor", "" )?;
//! 		let output = object.outlet( "(number) scaled value", "" )?;
//! 		let factor = object.attribute( "factor", 1.0, AttributeConfig::new()
//! 			.title( "Scale Factor" )
//! 			.range([ 0.0, 10.0 ])
//! 			.setter(| scale: &mut Scale, args: &Atoms | {
//! 				scale.changes += 1 ;
//! 				args.clone()
//! 			}))?;
//!
//! 		// Registered as "float".
//! 		object.method( "number", | scale: &mut Scale, object, args | {
//! 			let Some( input ) = args.first() else { return Atoms::new() };
//! 			let factor = object.get( scale.factor ).unwrap_or( 1.0 );
//! 			let _ = object.send( scale.output, input.as_float() * factor );
//! 			atoms![ input.as_float() * factor ]
//! 		})?;
//!
//! 		Ok( Self { output, factor, changes: 0 })
//! 	}
//! }
//!
//! let mut scale = Wrapper::<Scale>::new( Rc::new( NullHost ), ObjectHandle::new( 1 ), &Atoms::new() )?;
//! let factor = scale.object().component().factor ;
//! scale.object_mut().set( factor, 2.0 )?;
//!
//! assert_eq!( scale.try_call( "float", &atoms![ 4.0 ]), atoms![ 8.0 ]);
//! assert_eq!( scale.try_call( "missing", &atoms![ 4.0 ]), Atoms::new() );
//! assert_eq!( scale.object().component().changes, 2 );
//! assert!( scale.object().base().inlets()[1].proxy().is_some() );
//!
//! // Members can only be declared while constructing.
//! assert!( matches!( scale.object_mut().base_mut().inlet( "late", "" ), Err( ObjectError::Sealed( _ ))));
//! # Ok::<(), ObjectError>(())
//! ```

mod atom ;
mod attribute ;
mod class ;
mod host ;
mod layout ;
mod method ;
mod object ;
mod port ;
pub mod bridge ;

pub use atom::{ Atom, Atoms, Symbol };
pub use attribute::{ AnyAttribute, Attribute, AttributeConfig, AttributeError, AttributeKey, AttributeValue, Datatype, Getter, Setter };
pub use class::{ deduce_class_name, AttributeDescription, ClassDescription, MethodDescription };
pub use host::{ AttributeObject, DictionaryHandle, Host, HostError, ObjectHandle, OutletHandle, ProxyHandle };
pub use layout::{ Component, HeaderKind, Layout, LayoutKind, Matrix, ObjectHeader, Perform, Sample, Standard, Wrapper };
pub use method::{ canonical_method_name, CallingConvention, Method, MethodBody };
pub use object::{ Lifecycle, Object, ObjectBase, ObjectError, PersistedState, DEFAULT_STATE_TOKEN };
pub use port::{ Inlet, InletId, Outlet, OutletId, OutletMessage, Port };
