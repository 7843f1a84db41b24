//! Host-native values.
//!
//! Everything that crosses the host boundary is an [`Atom`] or an ordered sequence of
//! them ([`Atoms`]). Symbols are interned for the life of the process, the same way the
//! host's own symbol table behaves: two symbols built from equal text share storage and
//! compare equal.

use std::collections::HashSet ;
use std::sync::{ Mutex, PoisonError };
use itertools::Itertools ;
use once_cell::sync::Lazy ;



static SYMBOL_TABLE: Lazy<Mutex<HashSet<&'static str>>> = Lazy::new(|| Mutex::new( HashSet::new() ));

/// An interned, immutable string.
///
/// Interned text is never freed. Symbols are meant for names and selectors, not for
/// arbitrary user data.
#[derive( Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord )]
pub struct Symbol( &'static str );

impl Symbol {

    /// Interns `text`, returning the existing symbol if it was seen before.
    pub fn new( text: &str ) -> Self {
        // A poisoned table still holds valid interned strings.
        let mut table = SYMBOL_TABLE.lock().unwrap_or_else( PoisonError::into_inner );
        if let Some( interned ) = table.get( text ) { return Self( *interned ) }
        let interned: &'static str = Box::leak( text.to_owned().into_boxed_str() );
        table.insert( interned );
        Self( interned )
    }

    /// The empty symbol, which numbers coerce to.
    #[inline] pub fn empty() -> Self { Self::new( "" ) }

    #[inline] pub fn as_str( &self ) -> &'static str { self.0 }

    #[inline] pub fn is_empty( &self ) -> bool { self.0.is_empty() }

}

impl Default for Symbol {
    fn default() -> Self { Self::empty() }
}

impl std::fmt::Debug for Symbol {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result { write!( f, "Symbol({:?})", self.0 )}
}

impl std::fmt::Display for Symbol {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result { f.write_str( self.0 )}
}

impl From<&str> for Symbol {
    fn from( text: &str ) -> Self { Self::new( text )}
}

impl From<String> for Symbol {
    fn from( text: String ) -> Self { Self::new( &text )}
}

impl PartialEq<str> for Symbol {
    fn eq( &self, other: &str ) -> bool { self.0 == other }
}

impl PartialEq<&str> for Symbol {
    fn eq( &self, other: &&str ) -> bool { self.0 == *other }
}

/// A single tagged host value.
///
/// Coercions between the variants follow the host's rules rather than Rust's: a symbol
/// read as a number is `0`, a number read as a symbol is the empty symbol.
#[derive( Copy, Clone, Debug, PartialEq )]
pub enum Atom {
    Int( i64 ),
    Float( f64 ),
    Symbol( Symbol ),
}

impl Atom {

    /// Integer view. Floats truncate toward zero.
    #[allow( clippy::cast_possible_truncation )]
    pub fn as_int( &self ) -> i64 { match self {
        Self::Int( value ) => *value,
        Self::Float( value ) => *value as i64,
        Self::Symbol( _ ) => 0,
    }}

    /// Floating point view.
    #[allow( clippy::cast_precision_loss )]
    pub fn as_float( &self ) -> f64 { match self {
        Self::Int( value ) => *value as f64,
        Self::Float( value ) => *value,
        Self::Symbol( _ ) => 0.0,
    }}

    /// Symbol view.
    pub fn as_symbol( &self ) -> Symbol { match self {
        Self::Symbol( symbol ) => *symbol,
        Self::Int( _ ) | Self::Float( _ ) => Symbol::empty(),
    }}

    #[inline] pub fn as_bool( &self ) -> bool { self.as_int() != 0 }

    #[inline] pub fn is_number( &self ) -> bool { !matches!( self, Self::Symbol( _ ))}

}

impl std::fmt::Display for Atom {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result { match self {
        Self::Int( value ) => write!( f, "{}", value ),
        Self::Float( value ) => write!( f, "{}", value ),
        Self::Symbol( symbol ) => write!( f, "{}", symbol ),
    }}
}

impl From<i64> for Atom { fn from( value: i64 ) -> Self { Self::Int( value )}}
impl From<i32> for Atom { fn from( value: i32 ) -> Self { Self::Int( i64::from( value ))}}
impl From<bool> for Atom { fn from( value: bool ) -> Self { Self::Int( i64::from( value ))}}
impl From<f64> for Atom { fn from( value: f64 ) -> Self { Self::Float( value )}}
impl From<f32> for Atom { fn from( value: f32 ) -> Self { Self::Float( f64::from( value ))}}
impl From<Symbol> for Atom { fn from( value: Symbol ) -> Self { Self::Symbol( value )}}
impl From<&str> for Atom { fn from( value: &str ) -> Self { Self::Symbol( Symbol::new( value ))}}
impl From<String> for Atom { fn from( value: String ) -> Self { Self::Symbol( Symbol::from( value ))}}

/// An ordered sequence of atoms: the argument, result and value type of every
/// cross-boundary call.
#[derive( Clone, Debug, Default, PartialEq )]
pub struct Atoms( Vec<Atom> );

impl Atoms {

    #[inline] pub fn new() -> Self { Self( Vec::new() )}

    #[inline] pub fn with_capacity( capacity: usize ) -> Self { Self( Vec::with_capacity( capacity ))}

    #[inline] pub fn push( &mut self, atom: impl Into<Atom> ) { self.0.push( atom.into() )}

    #[inline] pub fn into_vec( self ) -> Vec<Atom> { self.0 }

    #[inline] pub fn as_slice( &self ) -> &[Atom] { &self.0 }

}

impl std::ops::Deref for Atoms {
    type Target = [Atom];
    fn deref( &self ) -> &[Atom] { &self.0 }
}

impl std::fmt::Display for Atoms {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        write!( f, "{}", self.0.iter().join( " " ))
    }
}

impl From<Vec<Atom>> for Atoms {
    fn from( atoms: Vec<Atom> ) -> Self { Self( atoms )}
}

impl From<&[Atom]> for Atoms {
    fn from( atoms: &[Atom] ) -> Self { Self( atoms.to_vec() )}
}

impl From<Atom> for Atoms {
    fn from( atom: Atom ) -> Self { Self( vec![ atom ])}
}

impl FromIterator<Atom> for Atoms {
    fn from_iter<I: IntoIterator<Item = Atom>>( iter: I ) -> Self { Self( iter.into_iter().collect() )}
}

impl IntoIterator for Atoms {
    type Item = Atom ;
    type IntoIter = std::vec::IntoIter<Atom> ;
    fn into_iter( self ) -> Self::IntoIter { self.0.into_iter() }
}

impl<'a> IntoIterator for &'a Atoms {
    type Item = &'a Atom ;
    type IntoIter = std::slice::Iter<'a, Atom> ;
    fn into_iter( self ) -> Self::IntoIter { self.0.iter() }
}

/// Builds [`Atoms`] from a list of values convertible into [`Atom`].
///
/// ```
/// use object_link::{ atoms, Atom };
/// let args = atoms![ 1, 2.5, "gain" ];
/// assert_eq!( args.len(), 3 );
/// assert_eq!( args[2], Atom::from( "gain" ));
/// ```
#[macro_export]
macro_rules! atoms {
    () => { $crate::Atoms::new() };
    ( $( $value:expr ),+ $(,)? ) => {
        $crate::Atoms::from( vec![ $( $crate::Atom::from( $value )),+ ])
    };
}

#[cfg( test )]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_interned() {
        let a = Symbol::new( "interned" );
        let b = Symbol::from( String::from( "interned" ));
        assert_eq!( a, b );
        assert!( std::ptr::eq( a.as_str(), b.as_str() ));
    }

    #[test]
    fn coercions_follow_host_rules() {
        assert_eq!( Atom::Float( -2.9 ).as_int(), -2 );
        assert_eq!( Atom::from( "x" ).as_int(), 0 );
        assert_eq!( Atom::from( "x" ).as_float(), 0.0 );
        assert!( Atom::Int( 7 ).as_symbol().is_empty() );
        assert!( Atom::from( true ).as_bool() );
    }

    #[test]
    fn atoms_display_space_separated() {
        let atoms = crate::atoms![ 1, 0.5, "foo" ];
        assert_eq!( atoms.to_string(), "1 0.5 foo" );
        assert_eq!( Atoms::new().to_string(), "" );
    }
}
