//! Typed, introspectable state cells.
//!
//! An [`Attribute`] holds one value of a native type and exposes it to the host by
//! name. The host only ever sees atoms and a [`Datatype`] tag; the component sees `T`.
//! Optional setter and getter closures customize the atom side of the conversion.

use std::any::Any ;
use std::marker::PhantomData ;
use thiserror::Error ;

use crate::atom::{ Atom, Atoms, Symbol };



/// Transforms incoming atoms before they are stored. Only the first atom of the
/// result is kept.
pub type Setter<C> = Box<dyn FnMut( &mut C, &Atoms ) -> Atoms> ;

/// Produces the atoms the host reads for an attribute.
pub type Getter<C> = Box<dyn FnMut( &C ) -> Atoms> ;

/// The host-facing type category of an attribute.
#[derive( Copy, Clone, Debug, Eq, PartialEq, Hash )]
pub enum Datatype {
    Long,
    Symbol,
    Float32,
    Float64,
}

impl Datatype {
    /// The name the host uses for this category.
    pub fn as_str( self ) -> &'static str { match self {
        Self::Long => "long",
        Self::Symbol => "symbol",
        Self::Float32 => "float32",
        Self::Float64 => "float64",
    }}

    #[inline] pub fn symbol( self ) -> Symbol { Symbol::new( self.as_str() )}
}

impl std::fmt::Display for Datatype {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { f.write_str( self.as_str() )}
}

/// A native type an [`Attribute`] can hold.
///
/// The datatype is a property of the type alone. Types that do not override it are
/// reported as 64-bit floats.
pub trait AttributeValue: Clone + 'static {

    /// Host category for this type.
    const DATATYPE: Datatype = Datatype::Float64 ;

    /// Coerces an incoming atom.
    fn from_atom( atom: &Atom ) -> Self ;

    fn to_atom( &self ) -> Atom ;

    /// Text used when rendering a range for the host.
    fn to_text( &self ) -> String { self.to_atom().to_string() }

}

impl AttributeValue for bool {
    const DATATYPE: Datatype = Datatype::Long ;
    fn from_atom( atom: &Atom ) -> Self { atom.as_bool() }
    fn to_atom( &self ) -> Atom { Atom::from( *self )}
}

impl AttributeValue for i32 {
    const DATATYPE: Datatype = Datatype::Long ;
    #[allow( clippy::cast_possible_truncation )]
    fn from_atom( atom: &Atom ) -> Self { atom.as_int() as i32 }
    fn to_atom( &self ) -> Atom { Atom::from( *self )}
}

impl AttributeValue for i64 {
    const DATATYPE: Datatype = Datatype::Long ;
    fn from_atom( atom: &Atom ) -> Self { atom.as_int() }
    fn to_atom( &self ) -> Atom { Atom::from( *self )}
}

impl AttributeValue for Symbol {
    const DATATYPE: Datatype = Datatype::Symbol ;
    fn from_atom( atom: &Atom ) -> Self { atom.as_symbol() }
    fn to_atom( &self ) -> Atom { Atom::from( *self )}
}

impl AttributeValue for f32 {
    const DATATYPE: Datatype = Datatype::Float32 ;
    #[allow( clippy::cast_possible_truncation )]
    fn from_atom( atom: &Atom ) -> Self { atom.as_float() as f32 }
    fn to_atom( &self ) -> Atom { Atom::from( *self )}
    fn to_text( &self ) -> String { self.to_string() }
}

impl AttributeValue for f64 {
    fn from_atom( atom: &Atom ) -> Self { atom.as_float() }
    fn to_atom( &self ) -> Atom { Atom::from( *self )}
}

/// Errors raised when assigning to an attribute.
#[derive( Error, Debug, Clone, PartialEq, Eq )]
pub enum AttributeError {
    /// The incoming atoms, or the setter's result, were empty.
    #[error( "Empty Value For Attribute: {attribute}" )]
    EmptyValue { attribute: String },
}

/// Optional properties of an attribute, set at registration.
///
/// Setters and getters receive the component, so they can translate through its
/// state. Both run only once the component exists: a default declared in
/// [`Component::construct`]( crate::Component::construct ) goes through the setter
/// right after `construct` returns.
///
/// ```
/// use object_link::{ AttributeConfig, Atoms };
/// struct Gain { clipped: bool }
/// let config = AttributeConfig::<Gain, f64>::new()
///     .title( "Gain" )
///     .range([ 0.0, 2.0 ])
///     .setter(| gain: &mut Gain, args: &Atoms | {
///         gain.clipped = args.first().is_some_and(| atom | atom.as_float() > 2.0 );
///         args.clone()
///     });
/// # let _ = config ;
/// ```
#[must_use = "pass the configuration to ObjectBase::attribute"]
pub struct AttributeConfig<C, T> {
    /// Label shown by the host instead of the name
    title: Option<String>,
    /// Range metadata, in order
    range: Vec<T>,
    setter: Option<Setter<C>>,
    getter: Option<Getter<C>>,
}

impl<C, T> AttributeConfig<C, T> {

    pub fn new() -> Self {
        Self { title: None, range: Vec::with_capacity( 0 ), setter: None, getter: None }
    }

    /// Sets the label. Defaults to the attribute's name.
    pub fn title( mut self, title: impl Into<String> ) -> Self {
        self.title = Some( title.into() );
        self
    }

    /// Appends every element to the range.
    pub fn range( mut self, range: impl IntoIterator<Item = T> ) -> Self {
        self.range.extend( range );
        self
    }

    /// Installs a custom setter.
    pub fn setter( mut self, setter: impl FnMut( &mut C, &Atoms ) -> Atoms + 'static ) -> Self {
        self.setter = Some( Box::new( setter ));
        self
    }

    /// Installs a custom getter, used when the host reads the attribute.
    pub fn getter( mut self, getter: impl FnMut( &C ) -> Atoms + 'static ) -> Self {
        self.getter = Some( Box::new( getter ));
        self
    }

}

impl<C, T> Default for AttributeConfig<C, T> {
    fn default() -> Self { Self::new() }
}

/// A typed state cell registered on an object.
pub struct Attribute<C, T> {
    name: Symbol,
    label: String,
    value: T,
    range: Vec<T>,
    setter: Option<Setter<C>>,
    getter: Option<Getter<C>>,
}

impl<C, T: AttributeValue> Attribute<C, T> {

    /// Builds the attribute holding `default` as is. The owner assigns the default
    /// through [`Attribute::assign`] once the component exists.
    pub(crate) fn new( name: &str, default: T, config: AttributeConfig<C, T> ) -> Self {
        let AttributeConfig { title, range, setter, getter } = config ;
        Self {
            name: Symbol::new( name ),
            label: title.unwrap_or_else(|| name.to_string() ),
            value: default,
            range,
            setter,
            getter,
        }
    }

    #[inline] pub fn name( &self ) -> Symbol { self.name }

    #[inline] pub fn label( &self ) -> &str { &self.label }

    /// Derived from `T` alone.
    #[inline] pub fn datatype( &self ) -> Datatype { T::DATATYPE }

    #[inline] pub fn value( &self ) -> &T { &self.value }

    #[inline] pub fn range( &self ) -> &[T] { &self.range }

    #[inline] pub fn has_setter( &self ) -> bool { self.setter.is_some() }

    #[inline] pub fn has_getter( &self ) -> bool { self.getter.is_some() }

    /// Assigns from atoms.
    ///
    /// With a setter installed, `args` goes through it and the first atom of its
    /// result is stored. Otherwise the first atom of `args` is coerced to `T`.
    ///
    /// # Errors
    /// [`AttributeError::EmptyValue`] if there is no first atom to store. The stored
    /// value is left untouched.
    pub fn assign( &mut self, component: &mut C, args: &Atoms ) -> Result<(), AttributeError> {
        let incoming = match self.setter.as_mut() {
            Some( setter ) => setter( component, args ).first().map( T::from_atom ),
            None => args.first().map( T::from_atom ),
        };
        self.value = incoming.ok_or_else(|| AttributeError::EmptyValue { attribute: self.name.to_string() })?;
        Ok(())
    }

    /// Assigns a native value through the same path as [`Attribute::assign`].
    ///
    /// # Errors
    /// See [`Attribute::assign`].
    pub fn set( &mut self, component: &mut C, value: T ) -> Result<(), AttributeError> {
        self.assign( component, &Atoms::from( value.to_atom() ))
    }

    /// The stored value as a one-element atom list.
    pub fn to_atoms( &self ) -> Atoms { Atoms::from( self.value.to_atom() )}

    /// What the host reads: the getter's result if one is installed, the stored
    /// value otherwise.
    pub fn get( &mut self, component: &C ) -> Atoms {
        match self.getter.as_mut() {
            Some( getter ) => getter( component ),
            None => self.to_atoms(),
        }
    }

    /// The range as space-terminated text, e.g. `"1 2 3 "`. Empty for no range.
    pub fn range_string( &self ) -> String {
        self.range.iter().map(| value | format!( "{} ", value.to_text() )).collect()
    }

}

impl<C, T: std::fmt::Debug> std::fmt::Debug for Attribute<C, T> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "Attribute" )
            .field( "name", &self.name )
            .field( "label", &self.label )
            .field( "value", &self.value )
            .field( "range", &self.range )
            .field( "setter", &self.setter.as_ref().map(| _ | "<closure>" ))
            .field( "getter", &self.getter.as_ref().map(| _ | "<closure>" ))
            .finish()
    }
}

/// Type-erased view of an [`Attribute`], as stored in an object's attribute table.
pub trait AnyAttribute<C>: Any {
    fn name( &self ) -> Symbol ;
    fn label( &self ) -> &str ;
    fn datatype( &self ) -> Datatype ;
    fn range_string( &self ) -> String ;
    /// # Errors
    /// See [`Attribute::assign`].
    fn assign( &mut self, component: &mut C, args: &Atoms ) -> Result<(), AttributeError> ;
    /// The stored value, ignoring any getter.
    fn to_atoms( &self ) -> Atoms ;
    /// What the host reads, honouring the getter.
    fn get( &mut self, component: &C ) -> Atoms ;
    fn as_any( &self ) -> &dyn Any ;
    fn as_any_mut( &mut self ) -> &mut dyn Any ;
}

impl<C: 'static, T: AttributeValue> AnyAttribute<C> for Attribute<C, T> {
    fn name( &self ) -> Symbol { self.name }
    fn label( &self ) -> &str { &self.label }
    fn datatype( &self ) -> Datatype { T::DATATYPE }
    fn range_string( &self ) -> String { Attribute::range_string( self )}
    fn assign( &mut self, component: &mut C, args: &Atoms ) -> Result<(), AttributeError> { Attribute::assign( self, component, args )}
    fn to_atoms( &self ) -> Atoms { Attribute::to_atoms( self )}
    fn get( &mut self, component: &C ) -> Atoms { Attribute::get( self, component )}
    fn as_any( &self ) -> &dyn Any { self }
    fn as_any_mut( &mut self ) -> &mut dyn Any { self }
}

/// Typed handle to an attribute registered on an object.
///
/// Returned by [`ObjectBase::attribute`]( crate::ObjectBase::attribute ) and kept by the
/// component to read and write the value natively.
pub struct AttributeKey<T> {
    name: Symbol,
    _type: PhantomData<fn() -> T>,
}

impl<T> AttributeKey<T> {
    pub(crate) fn new( name: Symbol ) -> Self { Self { name, _type: PhantomData }}
    #[inline] pub fn name( &self ) -> Symbol { self.name }
}

impl<T> Clone for AttributeKey<T> {
    fn clone( &self ) -> Self { *self }
}

impl<T> Copy for AttributeKey<T> {}

impl<T> std::fmt::Debug for AttributeKey<T> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_tuple( "AttributeKey" ).field( &self.name ).finish()
    }
}
