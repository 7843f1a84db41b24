//! Inlets and outlets.
//!
//! Ports are registered through [`ObjectBase::inlet`]( crate::ObjectBase::inlet ) and
//! [`ObjectBase::outlet`]( crate::ObjectBase::outlet ), which append them to the owner's
//! ordered lists and hand back a typed index. The index is the port number the host
//! sees, so registration order is significant.

use std::rc::Rc ;

use crate::atom::{ Atom, Atoms, Symbol };
use crate::host::{ Host, HostError, OutletHandle, ProxyHandle };



/// Position of an inlet in its owner's inlet list.
#[derive( Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord )]
pub struct InletId( pub(crate) usize );

/// Position of an outlet in its owner's outlet list.
#[derive( Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord )]
pub struct OutletId( pub(crate) usize );

impl InletId {
    /// The id of inlet number `index`, as the host reports it.
    #[inline] pub const fn from_index( index: usize ) -> Self { Self( index )}
    /// The host-visible inlet number.
    #[inline] pub fn index( self ) -> usize { self.0 }
}

impl OutletId {
    #[inline] pub const fn from_index( index: usize ) -> Self { Self( index )}
    /// The host-visible outlet number.
    #[inline] pub fn index( self ) -> usize { self.0 }
}

/// What inlets and outlets have in common.
#[derive( Debug, Clone )]
pub struct Port {
    /// Human readable description shown by the host's assistance UI
    description: String,
    /// Type tag, e.g. `"signal"`; empty for plain message ports
    kind: String,
    /// Set by the host once its connection analysis finds a signal patch cord
    signal_connection: bool,
}

impl Port {

    fn new( description: impl Into<String>, kind: impl Into<String> ) -> Self {
        Self { description: description.into(), kind: kind.into(), signal_connection: false }
    }

    #[inline] pub fn description( &self ) -> &str { &self.description }

    #[inline] pub fn kind( &self ) -> &str { &self.kind }

    /// Whether the host found a signal connection on this port.
    ///
    /// Only meaningful after the host's connection analysis, which runs after the
    /// owner has been fully constructed. Until then this is always `false`.
    #[inline] pub fn has_signal_connection( &self ) -> bool { self.signal_connection }

    pub(crate) fn set_signal_connection( &mut self, connected: bool ) { self.signal_connection = connected }

}

/// An inbound port.
///
/// Inlet 0 is the host's primary dispatch target. Every other inlet receives a host
/// proxy when the owner is set up with the standard layout.
#[derive( Debug, Clone )]
pub struct Inlet {
    port: Port,
    proxy: Option<ProxyHandle>,
}

impl Inlet {

    pub(crate) fn new( description: impl Into<String>, kind: impl Into<String> ) -> Self {
        Self { port: Port::new( description, kind ), proxy: None }
    }

    /// The proxy bound to this inlet, if any.
    #[inline] pub fn proxy( &self ) -> Option<ProxyHandle> { self.proxy }

    pub(crate) fn bind_proxy( &mut self, proxy: ProxyHandle ) { self.proxy = Some( proxy ) }

    pub(crate) fn port_mut( &mut self ) -> &mut Port { &mut self.port }

}

impl std::ops::Deref for Inlet {
    type Target = Port ;
    fn deref( &self ) -> &Port { &self.port }
}

/// An outbound port.
pub struct Outlet {
    port: Port,
    handle: OutletHandle,
    host: Rc<dyn Host>,
}

impl Outlet {

    pub(crate) fn new(
        description: impl Into<String>,
        kind: impl Into<String>,
        handle: OutletHandle,
        host: Rc<dyn Host>,
    ) -> Self {
        Self { port: Port::new( description, kind ), handle, host }
    }

    #[inline] pub fn handle( &self ) -> OutletHandle { self.handle }

    /// Emits `message` through the host.
    ///
    /// Every message maps to exactly one host emission call.
    ///
    /// ```
    /// # use object_link::{ Outlet, Symbol };
    /// # fn example( outlet: &Outlet ) -> Result<(), object_link::HostError> {
    /// outlet.send( 0.5 )?;
    /// outlet.send( "bang" )?;
    /// outlet.send(( Symbol::new( "gain" ), 0.75 ))?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Whatever the host's emission primitive reports.
    pub fn send( &self, message: impl Into<OutletMessage> ) -> Result<(), HostError> {
        match message.into() {
            OutletMessage::Float( value ) => self.host.outlet_float( self.handle, value ),
            OutletMessage::Anything( selector, args ) => self.host.outlet_anything( self.handle, selector, &args ),
        }
    }

    pub(crate) fn port_mut( &mut self ) -> &mut Port { &mut self.port }

}

impl std::ops::Deref for Outlet {
    type Target = Port ;
    fn deref( &self ) -> &Port { &self.port }
}

impl std::fmt::Debug for Outlet {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "Outlet" )
            .field( "port", &self.port )
            .field( "handle", &self.handle )
            .field( "host", &"<Host>" )
            .finish()
    }
}

/// One outbound message, in the shape the host's emission primitives accept.
#[derive( Debug, Clone, PartialEq )]
pub enum OutletMessage {
    /// A bare number.
    Float( f64 ),
    /// A selector with arguments.
    Anything( Symbol, Atoms ),
}

impl From<f64> for OutletMessage {
    fn from( value: f64 ) -> Self { Self::Float( value )}
}

impl From<Symbol> for OutletMessage {
    fn from( selector: Symbol ) -> Self { Self::Anything( selector, Atoms::new() )}
}

impl From<&str> for OutletMessage {
    fn from( selector: &str ) -> Self { Self::Anything( Symbol::new( selector ), Atoms::new() )}
}

impl From<String> for OutletMessage {
    fn from( selector: String ) -> Self { Self::Anything( Symbol::from( selector ), Atoms::new() )}
}

impl From<( Symbol, Symbol )> for OutletMessage {
    fn from(( selector, value ): ( Symbol, Symbol )) -> Self { Self::Anything( selector, Atoms::from( Atom::from( value )))}
}

impl From<( Symbol, f64 )> for OutletMessage {
    fn from(( selector, value ): ( Symbol, f64 )) -> Self { Self::Anything( selector, Atoms::from( Atom::from( value )))}
}

impl From<( Symbol, Atoms )> for OutletMessage {
    fn from(( selector, args ): ( Symbol, Atoms )) -> Self { Self::Anything( selector, args )}
}
