//! The boundary with the host environment.
//!
//! The host owns object allocation, message entry points, signal scheduling and its
//! own memory. This crate never implements any of that: every call that leaves the
//! runtime goes through the [`Host`] trait, and the host's objects are only ever seen
//! as the opaque handles defined here.

use thiserror::Error ;

use crate::atom::{ Atom, Symbol };



macro_rules! host_handle {
    ( $( #[$meta:meta] )* $name:ident ) => {
        $( #[$meta] )*
        #[derive( Copy, Clone, Debug, Eq, PartialEq, Hash )]
        pub struct $name( usize );

        impl $name {
            /// Wraps a raw host handle.
            pub const fn new( raw: usize ) -> Self { Self( raw )}
            /// The raw value as the host knows it.
            #[inline] pub const fn raw( self ) -> usize { self.0 }
            /// Whether the host handed out a null handle.
            #[inline] pub const fn is_null( self ) -> bool { self.0 == 0 }
        }
    };
}

host_handle!(
    /// The host's object header for one component instance.
    ObjectHandle
);
host_handle!(
    /// A host outlet, the target of emission primitives.
    OutletHandle
);
host_handle!(
    /// A host proxy bound to an auxiliary inlet.
    ProxyHandle
);
host_handle!(
    /// A host attribute object, passed to the attribute bridge functions.
    AttributeObject
);
host_handle!(
    /// A host-owned key/value dictionary.
    DictionaryHandle
);

/// A failure status reported by a host primitive.
///
/// The runtime never retries or reinterprets these; they are handed back to whoever
/// made the call.
#[derive( Error, Copy, Clone, Debug, Eq, PartialEq )]
pub enum HostError {
    #[error( "Generic Error" )] Generic,
    #[error( "Invalid Pointer" )] InvalidPointer,
    #[error( "Duplicate" )] Duplicate,
    #[error( "Out Of Memory" )] OutOfMemory,
    #[error( "Host Error Code: {0}" )] Other( i64 ),
}

impl HostError {

    /// Interprets a raw host status. `0` means success.
    pub fn check( code: i64 ) -> Result<(), Self> { match code {
        0 => Ok(()),
        -1 => Err( Self::Generic ),
        -2 => Err( Self::InvalidPointer ),
        -3 => Err( Self::Duplicate ),
        -4 => Err( Self::OutOfMemory ),
        other => Err( Self::Other( other )),
    }}

    /// The raw host status for this error.
    pub fn code( self ) -> i64 { match self {
        Self::Generic => -1,
        Self::InvalidPointer => -2,
        Self::Duplicate => -3,
        Self::OutOfMemory => -4,
        Self::Other( code ) => code,
    }}

}

/// Calls the runtime makes into the host.
///
/// Signatures mirror the host's own primitives. Implementations are expected to be
/// cheap and non-blocking: they are invoked synchronously from inside dispatch.
pub trait Host {

    /// Creates the host side of an outlet for `object`.
    fn outlet_new( &self, object: ObjectHandle, kind: &str ) -> OutletHandle ;

    /// Emits a bare number from `outlet`.
    ///
    /// # Errors
    /// Whatever the host's emission primitive reports.
    fn outlet_float( &self, outlet: OutletHandle, value: f64 ) -> Result<(), HostError> ;

    /// Emits `selector` followed by `args` from `outlet`.
    ///
    /// # Errors
    /// Whatever the host's emission primitive reports.
    fn outlet_anything( &self, outlet: OutletHandle, selector: Symbol, args: &[Atom] ) -> Result<(), HostError> ;

    /// Binds auxiliary inlet `index` of `object` to a new host proxy.
    fn proxy_new( &self, object: ObjectHandle, index: usize ) -> ProxyHandle ;

    /// The inlet the message currently being dispatched to `object` arrived on.
    fn proxy_getinlet( &self, object: ObjectHandle ) -> usize ;

    /// Tells the host that attribute `name` of `object` changed.
    fn attr_touch( &self, object: ObjectHandle, name: Symbol );

    /// Resolves the registered name of a host attribute object.
    fn attribute_name( &self, attribute: AttributeObject ) -> Option<Symbol> ;

    /// Registers `inlets` signal inputs for `object`.
    fn dsp_setup( &self, object: ObjectHandle, inlets: usize );

    /// Releases what [`Host::dsp_setup`] registered.
    fn dsp_free( &self, object: ObjectHandle );

}
