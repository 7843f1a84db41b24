//! Per-instance registries.
//!
//! [`ObjectBase`] holds everything a component declares: its inlets and outlets in
//! order, its methods and attributes by name, the lifecycle flags and the persisted
//! state handle. [`Object`] pairs those registries with the component value itself and
//! is what the host dispatches into.
//!
//! Registries only grow during construction. Once the object is initialized they are
//! sealed: declaring a member fails with [`ObjectError::Sealed`] and only attribute
//! values change.

use std::collections::HashMap ;
use std::rc::Rc ;
use thiserror::Error ;

use crate::atom::{ Atom, Atoms, Symbol };
use crate::attribute::{ AnyAttribute, Attribute, AttributeConfig, AttributeError, AttributeKey, AttributeValue };
use crate::host::{ DictionaryHandle, Host, HostError, ObjectHandle };
use crate::method::{ Method, MethodBody };
use crate::port::{ Inlet, InletId, Outlet, OutletId, OutletMessage };



/// Token the host passes when no explicit state was supplied.
pub const DEFAULT_STATE_TOKEN: &str = "#D" ;

/// Errors raised by the typed object API.
///
/// The host-facing entry points ([`Object::try_call`], [`crate::bridge`]) never
/// surface "unknown name" as an error; these only reach Rust callers.
#[derive( Error, Debug )]
pub enum ObjectError {
    /// No attribute is registered under this name.
    #[error( "Unknown Attribute: {0}" )] UnknownAttribute( String ),
    /// The key's type does not match the registered attribute.
    #[error( "Type Mismatch: attribute {attribute} is not {expected}" )]
    TypeMismatch { attribute: String, expected: &'static str },
    /// No outlet at this index.
    #[error( "Unknown Outlet: {0}" )] UnknownOutlet( usize ),
    /// No inlet at this index.
    #[error( "Unknown Inlet: {0}" )] UnknownInlet( usize ),
    /// A member was declared after construction finished.
    #[error( "Registries Sealed: cannot declare {0} after construction" )] Sealed( String ),
    #[error( "Attribute Error: {0}" )] Attribute( #[from] AttributeError ),
    #[error( "Host Error: {0}" )] Host( #[from] HostError ),
}

/// Where an object is in its construction.
///
/// `initializing` and `initialized` are never both true; a single state makes that
/// structural.
#[derive( Copy, Clone, Debug, Eq, PartialEq, Hash, Default )]
pub enum Lifecycle {
    /// The registries exist but member construction has not started.
    #[default] Constructed,
    /// Members are being declared.
    Initializing,
    /// Construction finished; the host may dispatch.
    Initialized,
}

/// The host-owned key/value store an object restores itself from.
#[derive( Copy, Clone, Debug, Eq, PartialEq, Hash, Default )]
pub enum PersistedState {
    /// No explicit state was supplied.
    #[default] Default,
    /// A host dictionary.
    Dictionary( DictionaryHandle ),
}

impl PersistedState {

    /// Reads the host's state argument. The sentinel token means [`PersistedState::Default`].
    pub fn from_symbol( token: Symbol ) -> Option<Self> {
        match token == DEFAULT_STATE_TOKEN {
            true => Some( Self::Default ),
            false => None,
        }
    }

    #[inline] pub fn is_default( &self ) -> bool { matches!( self, Self::Default )}

    #[inline] pub fn dictionary( &self ) -> Option<DictionaryHandle> { match self {
        Self::Default => None,
        Self::Dictionary( handle ) => Some( *handle ),
    }}

}

impl From<DictionaryHandle> for PersistedState {
    fn from( handle: DictionaryHandle ) -> Self { Self::Dictionary( handle )}
}

/// The registries and lifecycle of one component instance.
///
/// Components declare their members by calling [`ObjectBase::inlet`],
/// [`ObjectBase::outlet`], [`ObjectBase::method`] and [`ObjectBase::attribute`] from
/// [`Component::construct`]( crate::Component::construct ). Declaration order is
/// registration order.
pub struct ObjectBase<C> {
    host: Rc<dyn Host>,
    handle: ObjectHandle,
    inlets: Vec<Inlet>,
    outlets: Vec<Outlet>,
    methods: HashMap<String, Method<C>>,
    attributes: HashMap<Symbol, Box<dyn AnyAttribute<C>>>,
    /// Defaults waiting for the component to exist, in declaration order
    pending_defaults: Vec<( Symbol, Atoms )>,
    lifecycle: Lifecycle,
    state: PersistedState,
}

impl<C> ObjectBase<C> {

    pub(crate) fn new( host: Rc<dyn Host>, handle: ObjectHandle, state: PersistedState ) -> Self {
        Self {
            host,
            handle,
            inlets: Vec::new(),
            outlets: Vec::new(),
            methods: HashMap::new(),
            attributes: HashMap::new(),
            pending_defaults: Vec::new(),
            lifecycle: Lifecycle::Constructed,
            state,
        }
    }

    /// The host's object header for this instance.
    #[inline] pub fn handle( &self ) -> ObjectHandle { self.handle }

    #[inline] pub fn host( &self ) -> &dyn Host { &*self.host }

    #[inline] pub fn state( &self ) -> PersistedState { self.state }

    #[inline] pub fn lifecycle( &self ) -> Lifecycle { self.lifecycle }

    #[inline] pub fn initializing( &self ) -> bool { self.lifecycle == Lifecycle::Initializing }

    #[inline] pub fn initialized( &self ) -> bool { self.lifecycle == Lifecycle::Initialized }

    /// Marks the start of member construction.
    ///
    /// The lifecycle only moves forward; an initialized object stays initialized.
    pub fn preinitialize( &mut self ) {
        match self.lifecycle {
            Lifecycle::Constructed => self.lifecycle = Lifecycle::Initializing,
            Lifecycle::Initializing | Lifecycle::Initialized => tracing::trace!( object = self.handle.raw(), lifecycle = ?self.lifecycle, "preinitialize ignored" ),
        }
    }

    /// Marks the end of member construction. Attribute changes notify the host from
    /// here on and the registries are sealed.
    pub fn postinitialize( &mut self ) {
        self.lifecycle = Lifecycle::Initialized ;
    }

    fn ensure_open( &self, member: &str ) -> Result<(), ObjectError> {
        match self.initialized() {
            true => {
                tracing::debug!( object = self.handle.raw(), member, "declaration after construction rejected" );
                Err( ObjectError::Sealed( member.to_string() ))
            },
            false => Ok(()),
        }
    }

    /// The inlet the message being dispatched arrived on.
    ///
    /// Only meaningful while the host is synchronously dispatching an inbound message.
    pub fn current_inlet( &self ) -> usize { self.host.proxy_getinlet( self.handle )}

    /// Declares an inlet. Its index is the number of inlets declared before it.
    ///
    /// # Errors
    /// [`ObjectError::Sealed`] once the object is initialized.
    pub fn inlet( &mut self, description: impl Into<String>, kind: impl Into<String> ) -> Result<InletId, ObjectError> {
        self.ensure_open( "inlet" )?;
        self.inlets.push( Inlet::new( description, kind ));
        Ok( InletId( self.inlets.len() - 1 ))
    }

    /// Declares an outlet and creates its host counterpart.
    ///
    /// # Errors
    /// [`ObjectError::Sealed`] once the object is initialized.
    pub fn outlet( &mut self, description: impl Into<String>, kind: impl Into<String> ) -> Result<OutletId, ObjectError> {
        self.ensure_open( "outlet" )?;
        let kind = kind.into();
        let handle = self.host.outlet_new( self.handle, &kind );
        self.outlets.push( Outlet::new( description, kind, handle, Rc::clone( &self.host )));
        Ok( OutletId( self.outlets.len() - 1 ))
    }

    #[inline] pub fn inlets( &self ) -> &[Inlet] { &self.inlets }

    #[inline] pub fn outlets( &self ) -> &[Outlet] { &self.outlets }

    pub(crate) fn inlets_mut( &mut self ) -> &mut [Inlet] { &mut self.inlets }

    /// Emits `message` from outlet `id`.
    ///
    /// # Errors
    /// [`ObjectError::UnknownOutlet`] for an id from another object, otherwise whatever
    /// the host's emission primitive reports.
    pub fn send( &self, id: OutletId, message: impl Into<OutletMessage> ) -> Result<(), ObjectError> {
        self.outlets.get( id.0 )
            .ok_or( ObjectError::UnknownOutlet( id.0 ))?
            .send( message )
            .map_err( ObjectError::from )
    }

    /// Records the host's connection analysis for an inlet.
    ///
    /// # Errors
    /// [`ObjectError::UnknownInlet`] if there is no such inlet.
    pub fn set_inlet_signal_connection( &mut self, id: InletId, connected: bool ) -> Result<(), ObjectError> {
        self.inlets.get_mut( id.0 ).ok_or( ObjectError::UnknownInlet( id.0 ))?.port_mut().set_signal_connection( connected );
        Ok(())
    }

    /// Records the host's connection analysis for an outlet.
    ///
    /// # Errors
    /// [`ObjectError::UnknownOutlet`] if there is no such outlet.
    pub fn set_outlet_signal_connection( &mut self, id: OutletId, connected: bool ) -> Result<(), ObjectError> {
        self.outlets.get_mut( id.0 ).ok_or( ObjectError::UnknownOutlet( id.0 ))?.port_mut().set_signal_connection( connected );
        Ok(())
    }

    /// Looks up a method by its canonical name.
    #[inline] pub fn find_method( &self, name: &str ) -> Option<&Method<C>> { self.methods.get( name )}

    /// Whether `name` is registered, which [`Object::try_call`] does not reveal.
    #[inline] pub fn has_method( &self, name: &str ) -> bool { self.methods.contains_key( name )}

    pub fn methods( &self ) -> impl Iterator<Item = &Method<C>> { self.methods.values() }

    pub(crate) fn methods_mut( &mut self ) -> &mut HashMap<String, Method<C>> { &mut self.methods }

    fn touch( &self, name: Symbol ) {
        if self.initialized() { self.host.attr_touch( self.handle, name ) }
    }

}

impl<C: 'static> ObjectBase<C> {

    /// Declares a method, replacing any earlier one with the same canonical name.
    ///
    /// `integer` registers as `int` and `number` as `float`.
    ///
    /// # Errors
    /// [`ObjectError::Sealed`] once the object is initialized.
    pub fn method(
        &mut self,
        name: &str,
        body: impl FnMut( &mut C, &mut ObjectBase<C>, &Atoms ) -> Atoms + 'static,
    ) -> Result<(), ObjectError> {
        self.ensure_open( "method" )?;
        let body: MethodBody<C> = Box::new( body );
        let method = Method::new( name, body );
        if let Some( replaced ) = self.methods.insert( method.name().to_string(), method ) {
            tracing::debug!( method = replaced.name(), "method registration replaced an earlier one" );
        }
        Ok(())
    }

    /// Declares an attribute with `default` as its value.
    ///
    /// The default is assigned through the same path as any later assignment, setter
    /// included, as soon as [`Component::construct`]( crate::Component::construct )
    /// has returned. No change notification is sent for it because the object is not
    /// yet initialized.
    ///
    /// # Errors
    /// [`ObjectError::Sealed`] once the object is initialized.
    pub fn attribute<T: AttributeValue>( &mut self, name: &str, default: T, config: AttributeConfig<C, T> ) -> Result<AttributeKey<T>, ObjectError> {
        self.ensure_open( "attribute" )?;
        let pending = Atoms::from( default.to_atom() );
        let attribute = Attribute::new( name, default, config );
        let key = AttributeKey::new( attribute.name() );
        if self.attributes.insert( key.name(), Box::new( attribute )).is_some() {
            tracing::debug!( attribute = name, "attribute registration replaced an earlier one" );
            self.pending_defaults.retain(|( declared, _ )| *declared != key.name() );
        }
        self.pending_defaults.push(( key.name(), pending ));
        Ok( key )
    }

    /// Runs every declared default through its attribute's assignment path.
    pub(crate) fn assign_defaults( &mut self, component: &mut C ) {
        for ( name, default ) in std::mem::take( &mut self.pending_defaults ) {
            let Some( attribute ) = self.attributes.get_mut( &name ) else { continue };
            if let Err( err ) = attribute.assign( component, &default ) {
                tracing::warn!( attribute = %name, %err, "default value rejected by setter" );
            }
        }
    }

    /// Looks up an attribute by name.
    pub fn find_attribute( &self, name: &str ) -> Option<&dyn AnyAttribute<C>> {
        self.attributes.get( &Symbol::new( name )).map(| attribute | &**attribute )
    }

    pub fn attributes( &self ) -> impl Iterator<Item = &dyn AnyAttribute<C>> {
        self.attributes.values().map(| attribute | &**attribute )
    }

    /// The typed attribute behind `key`.
    ///
    /// # Errors
    /// [`ObjectError::UnknownAttribute`] or [`ObjectError::TypeMismatch`].
    pub fn typed_attribute<T: AttributeValue>( &self, key: AttributeKey<T> ) -> Result<&Attribute<C, T>, ObjectError> {
        self.attributes.get( &key.name() )
            .ok_or_else(|| ObjectError::UnknownAttribute( key.name().to_string() ))?
            .as_any()
            .downcast_ref::<Attribute<C, T>>()
            .ok_or_else(|| ObjectError::TypeMismatch { attribute: key.name().to_string(), expected: std::any::type_name::<T>() })
    }

    fn typed_attribute_mut<T: AttributeValue>( &mut self, key: AttributeKey<T> ) -> Result<&mut Attribute<C, T>, ObjectError> {
        self.attributes.get_mut( &key.name() )
            .ok_or_else(|| ObjectError::UnknownAttribute( key.name().to_string() ))?
            .as_any_mut()
            .downcast_mut::<Attribute<C, T>>()
            .ok_or_else(|| ObjectError::TypeMismatch { attribute: key.name().to_string(), expected: std::any::type_name::<T>() })
    }

    /// Reads an attribute natively. Getters are not consulted.
    ///
    /// # Errors
    /// See [`ObjectBase::typed_attribute`].
    pub fn get<T: AttributeValue>( &self, key: AttributeKey<T> ) -> Result<T, ObjectError> {
        Ok( self.typed_attribute( key )?.value().clone() )
    }

    /// Assigns an attribute natively, notifying the host once initialized.
    ///
    /// `component` is handed to the attribute's setter. Inside a method body that is
    /// the component the body received; elsewhere use [`Object::set`].
    ///
    /// # Errors
    /// See [`ObjectBase::typed_attribute`] and [`Attribute::assign`].
    pub fn set<T: AttributeValue>( &mut self, key: AttributeKey<T>, value: T, component: &mut C ) -> Result<(), ObjectError> {
        self.typed_attribute_mut( key )?.set( component, value )?;
        self.touch( key.name() );
        Ok(())
    }

    /// Assigns an attribute from atoms, notifying the host once initialized.
    ///
    /// # Errors
    /// [`ObjectError::UnknownAttribute`], or the assignment's own error.
    pub fn set_atoms( &mut self, name: Symbol, args: &Atoms, component: &mut C ) -> Result<(), ObjectError> {
        self.attributes.get_mut( &name )
            .ok_or_else(|| ObjectError::UnknownAttribute( name.to_string() ))?
            .assign( component, args )?;
        self.touch( name );
        Ok(())
    }

    /// Reads an attribute the way the host does: through its getter if it has one.
    pub fn get_atoms( &mut self, name: Symbol, component: &C ) -> Option<Atoms> {
        self.attributes.get_mut( &name ).map(| attribute | attribute.get( component ))
    }

}

impl<C> std::fmt::Debug for ObjectBase<C> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "ObjectBase" )
            .field( "handle", &self.handle )
            .field( "inlets", &self.inlets )
            .field( "outlets", &self.outlets )
            .field( "methods", &self.methods.keys().collect::<Vec<_>>() )
            .field( "attributes", &self.attributes.keys().collect::<Vec<_>>() )
            .field( "lifecycle", &self.lifecycle )
            .field( "state", &self.state )
            .finish_non_exhaustive()
    }
}

/// A component together with its registries.
///
/// This is what the host addresses by name once construction has finished.
pub struct Object<C> {
    pub(crate) base: ObjectBase<C>,
    pub(crate) component: C,
}

impl<C: 'static> Object<C> {

    #[inline] pub fn base( &self ) -> &ObjectBase<C> { &self.base }

    #[inline] pub fn base_mut( &mut self ) -> &mut ObjectBase<C> { &mut self.base }

    #[inline] pub fn component( &self ) -> &C { &self.component }

    #[inline] pub fn component_mut( &mut self ) -> &mut C { &mut self.component }

    /// Calls the method registered under `name`.
    ///
    /// Returns an empty list if no such method exists. That is indistinguishable from a
    /// method that returned nothing; use [`ObjectBase::has_method`] to tell them apart.
    /// The name is matched as given, so `integer` does not reach a method registered
    /// as `int`.
    ///
    /// While a body runs its slot is vacated: a body that calls its own name again
    /// gets an empty result. A body that finds its slot refilled when it returns is
    /// dropped in favour of the newer one.
    pub fn try_call( &mut self, name: &str, args: &Atoms ) -> Atoms {
        let Some( mut body ) = self.base.methods_mut().get_mut( name ).and_then( Method::take_body ) else {
            tracing::trace!( method = name, "try_call found nothing to call" );
            return Atoms::new()
        };
        let result = body( &mut self.component, &mut self.base, args );
        if let Some( method ) = self.base.methods_mut().get_mut( name ) { method.restore_body( body ) }
        result
    }

    /// [`Object::try_call`] with a single argument.
    pub fn try_call_one( &mut self, name: &str, arg: impl Into<Atom> ) -> Atoms {
        self.try_call( name, &Atoms::from( arg.into() ))
    }

    /// Assigns an attribute natively. See [`ObjectBase::set`].
    ///
    /// # Errors
    /// See [`ObjectBase::set`].
    pub fn set<T: AttributeValue>( &mut self, key: AttributeKey<T>, value: T ) -> Result<(), ObjectError> {
        self.base.set( key, value, &mut self.component )
    }

    /// Assigns an attribute from atoms. See [`ObjectBase::set_atoms`].
    ///
    /// # Errors
    /// See [`ObjectBase::set_atoms`].
    pub fn set_atoms( &mut self, name: Symbol, args: &Atoms ) -> Result<(), ObjectError> {
        self.base.set_atoms( name, args, &mut self.component )
    }

    /// Reads an attribute the way the host does. See [`ObjectBase::get_atoms`].
    pub fn get_atoms( &mut self, name: Symbol ) -> Option<Atoms> {
        self.base.get_atoms( name, &self.component )
    }

}

impl<C: std::fmt::Debug> std::fmt::Debug for Object<C> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "Object" )
            .field( "base", &self.base )
            .field( "component", &self.component )
            .finish()
    }
}
