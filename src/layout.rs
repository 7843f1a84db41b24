use std::rc::Rc ;

use crate::atom::Atoms ;
use crate::host::{ Host, ObjectHandle };
use crate::object::{ Object, ObjectBase, ObjectError, PersistedState };



/// A type the host can instantiate.
///
/// `Layout` picks how the component is presented to the host. It is one of the four
/// marker types in this module and is fixed at compile time, because the host relies
/// on the object header having a known shape per class.
///
/// ```
/// use object_link::{ Atoms, AttributeConfig, AttributeKey, Component, ObjectBase, ObjectError, OutletId, Standard, atoms };
///
/// struct Counter { count: i64, out: OutletId, step: AttributeKey<i64> }
///
/// impl Component for Counter {
///     type Layout = Standard ;
///     fn construct( object: &mut ObjectBase<Self>, _args: &Atoms ) -> Result<Self, ObjectError> {
///         object.inlet( "bang to count", "" )?;
///         let out = object.outlet( "count", "" )?;
///         let step = object.attribute( "step", 1, AttributeConfig::new().title( "Step" ))?;
///         object.method( "bang", | counter: &mut Counter, object, _args | {
///             counter.count += object.get( counter.step ).unwrap_or( 1 );
///             atoms![ counter.count ]
///         })?;
///         Ok( Self { count: 0, out, step })
///     }
/// }
/// ```
pub trait Component: Sized + 'static {

    /// The host-integration layout for this component.
    type Layout: Layout ;

    /// Declares the component's members on `object` and builds the component value.
    ///
    /// Runs between [`ObjectBase::preinitialize`] and [`ObjectBase::postinitialize`].
    /// This is the only place members can be declared.
    ///
    /// # Errors
    /// Whatever the component reports; the instance is then never set up.
    fn construct( object: &mut ObjectBase<Self>, args: &Atoms ) -> Result<Self, ObjectError> ;

}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Standard {}
    impl Sealed for super::Perform {}
    impl Sealed for super::Sample {}
    impl Sealed for super::Matrix {}
}

/// Which object header the host allocates for a class.
#[derive( Copy, Clone, Debug, Eq, PartialEq, Hash )]
pub enum HeaderKind {
    /// A plain message object.
    Object,
    /// A signal object, which carries the host's signal bookkeeping.
    SignalObject,
}

/// Runtime name of a layout, for introspection.
#[derive( Copy, Clone, Debug, Eq, PartialEq, Hash )]
pub enum LayoutKind {
    Standard,
    Perform,
    Sample,
    Matrix,
}

impl std::fmt::Display for LayoutKind {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { write!( f, "{:?}", self )}
}

/// Host-integration layout, selected by [`Component::Layout`].
///
/// Sealed: the set of layouts is closed.
pub trait Layout: sealed::Sealed {

    const KIND: LayoutKind ;

    const HEADER: HeaderKind ;

    /// Host setup that runs once the component's members are declared.
    fn setup<C>( object: &mut ObjectBase<C> );

    /// Undoes [`Layout::setup`] when the wrapper is dropped.
    fn cleanup<C>( _object: &mut ObjectBase<C> ) {}

}

/// Message objects. The default layout.
#[derive( Copy, Clone, Debug, Default )]
pub struct Standard ;

/// Signal objects processing whole vectors.
#[derive( Copy, Clone, Debug, Default )]
pub struct Perform ;

/// Signal objects processing one sample at a time.
#[derive( Copy, Clone, Debug, Default )]
pub struct Sample ;

/// Matrix processing objects.
#[derive( Copy, Clone, Debug, Default )]
pub struct Matrix ;

impl Layout for Standard {

    const KIND: LayoutKind = LayoutKind::Standard ;
    const HEADER: HeaderKind = HeaderKind::Object ;

    fn setup<C>( object: &mut ObjectBase<C> ) { bind_proxies( object ) }

}

/// Binds every inlet but the first to a host proxy, highest index first. Inlet 0 is
/// the host's primary dispatch target and never gets one. The host owns the proxies,
/// so there is nothing to clean up.
fn bind_proxies<C>( object: &mut ObjectBase<C> ) {
    let handle = object.handle();
    for index in ( 1..object.inlets().len() ).rev() {
        let proxy = object.host().proxy_new( handle, index );
        object.inlets_mut()[index].bind_proxy( proxy );
    }
    tracing::debug!( object = handle.raw(), proxies = object.inlets().len().saturating_sub( 1 ), "bound inlet proxies" );
}

fn signal_setup<C>( object: &mut ObjectBase<C> ) {
    let inlets = object.inlets().len();
    object.host().dsp_setup( object.handle(), inlets );
    tracing::debug!( object = object.handle().raw(), inlets, "registered signal inlets" );
}

impl Layout for Perform {
    const KIND: LayoutKind = LayoutKind::Perform ;
    const HEADER: HeaderKind = HeaderKind::SignalObject ;
    fn setup<C>( object: &mut ObjectBase<C> ) { signal_setup( object ) }
    fn cleanup<C>( object: &mut ObjectBase<C> ) { object.host().dsp_free( object.handle() ) }
}

impl Layout for Sample {
    const KIND: LayoutKind = LayoutKind::Sample ;
    const HEADER: HeaderKind = HeaderKind::SignalObject ;
    fn setup<C>( object: &mut ObjectBase<C> ) { signal_setup( object ) }
    fn cleanup<C>( object: &mut ObjectBase<C> ) { object.host().dsp_free( object.handle() ) }
}

// Matrix objects are plain message objects to the host; only signal layouts skip
// proxy binding.
impl Layout for Matrix {
    const KIND: LayoutKind = LayoutKind::Matrix ;
    const HEADER: HeaderKind = HeaderKind::Object ;
    fn setup<C>( object: &mut ObjectBase<C> ) { bind_proxies( object ) }
}

/// The host's view of an instance: which header it allocated and where.
#[derive( Copy, Clone, Debug, Eq, PartialEq, Hash )]
pub struct ObjectHeader {
    handle: ObjectHandle,
    kind: HeaderKind,
}

impl ObjectHeader {
    #[inline] pub fn handle( &self ) -> ObjectHandle { self.handle }
    #[inline] pub fn kind( &self ) -> HeaderKind { self.kind }
}

/// A component instance in the layout its [`Component::Layout`] selects.
///
/// Construction runs `preinitialize`, [`Component::construct`], the declared defaults,
/// the layout's setup and `postinitialize`, in that order. Dropping the wrapper runs the
/// layout's cleanup.
pub struct Wrapper<C: Component> {
    header: ObjectHeader,
    object: Object<C>,
}

impl<C: Component> Wrapper<C> {

    /// Instantiates `C` for the host object `handle` with default persisted state.
    ///
    /// # Errors
    /// Whatever [`Component::construct`] reports.
    pub fn new( host: Rc<dyn Host>, handle: ObjectHandle, args: &Atoms ) -> Result<Self, ObjectError> {
        Self::with_state( host, handle, args, PersistedState::Default )
    }

    /// Instantiates `C`, restoring from `state`.
    ///
    /// # Errors
    /// Whatever [`Component::construct`] reports.
    pub fn with_state( host: Rc<dyn Host>, handle: ObjectHandle, args: &Atoms, state: PersistedState ) -> Result<Self, ObjectError> {
        let mut base = ObjectBase::new( host, handle, state );
        base.preinitialize();
        let mut component = C::construct( &mut base, args )?;
        base.assign_defaults( &mut component );
        C::Layout::setup( &mut base );
        base.postinitialize();
        Ok( Self {
            header: ObjectHeader { handle, kind: C::Layout::HEADER },
            object: Object { base, component },
        })
    }

    #[inline] pub fn header( &self ) -> ObjectHeader { self.header }

    #[inline] pub fn object( &self ) -> &Object<C> { &self.object }

    #[inline] pub fn object_mut( &mut self ) -> &mut Object<C> { &mut self.object }

    /// See [`Object::try_call`].
    #[inline] pub fn try_call( &mut self, name: &str, args: &Atoms ) -> Atoms { self.object.try_call( name, args )}

}

impl<C: Component> Drop for Wrapper<C> {
    fn drop( &mut self ) { C::Layout::cleanup( &mut self.object.base ) }
}

impl<C: Component> From<&Wrapper<C>> for ObjectHandle {
    fn from( wrapper: &Wrapper<C> ) -> Self { wrapper.header.handle }
}

impl<C: Component + std::fmt::Debug> std::fmt::Debug for Wrapper<C> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "Wrapper" )
            .field( "header", &self.header )
            .field( "object", &self.object )
            .finish()
    }
}
