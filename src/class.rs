//! Class-level information the host needs before it can create instances.
//!
//! The host registers a class under a name and with a fixed set of messages and
//! attributes. The name is deduced from the source file that defines the component;
//! the members are read off a prototype instance, since they are only known once a
//! component has declared them.

use itertools::Itertools ;

use crate::atom::Symbol ;
use crate::attribute::Datatype ;
use crate::layout::{ Component, HeaderKind, Layout, LayoutKind, Wrapper };
use crate::method::CallingConvention ;



/// Source suffixes stripped from a class name.
const SOURCE_EXTENSIONS: [&str; 2] = [ ".cpp", ".rs" ];

/// Derives a class name from a source file path.
///
/// Directories are stripped (either separator). A `_tilde` suffix before the source
/// extension marks a signal-rate class and becomes `~`. The source extension is
/// dropped; any other name is returned as is.
///
/// ```
/// use object_link::deduce_class_name ;
/// assert_eq!( deduce_class_name( "/src/objects/gain_tilde.cpp" ), "gain~" );
/// assert_eq!( deduce_class_name( r"C:\src\counter.cpp" ), "counter" );
/// assert_eq!( deduce_class_name( "metro" ), "metro" );
/// ```
pub fn deduce_class_name( path: &str ) -> String {

    let file = match path.rfind( '/' ) {
        Some( separator ) => &path[separator + 1..],
        None => match path.rfind( '\\' ) {
            Some( separator ) => &path[separator + 1..],
            None => path,
        },
    };

    let signal = SOURCE_EXTENSIONS.iter()
        .find_map(| extension | file.find( &format!( "_tilde{}", extension )))
        .map(| end | format!( "{}~", &file[..end] ));

    signal
        .or_else(|| SOURCE_EXTENSIONS.iter().find_map(| extension | file.strip_suffix( extension )).map( str::to_string ))
        .unwrap_or_else(|| file.to_string() )

}

/// The class name for the source file this macro is expanded in.
#[macro_export]
macro_rules! class_name {
    () => { $crate::deduce_class_name( file!() ) };
}

/// A method as the host registers it.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct MethodDescription {
    pub name: String,
    pub convention: CallingConvention,
}

/// An attribute as the host registers it.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct AttributeDescription {
    pub name: Symbol,
    pub label: String,
    pub datatype: Datatype,
    pub range: String,
}

/// Everything the host needs to register a class.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct ClassDescription {
    pub name: String,
    pub layout: LayoutKind,
    pub header: HeaderKind,
    pub inlets: usize,
    pub outlets: usize,
    /// Sorted by name
    pub methods: Vec<MethodDescription>,
    /// Sorted by name
    pub attributes: Vec<AttributeDescription>,
}

impl ClassDescription {

    /// Describes the class of `prototype` under `name`.
    pub fn of<C: Component>( name: impl Into<String>, prototype: &Wrapper<C> ) -> Self {
        let base = prototype.object().base();
        Self {
            name: name.into(),
            layout: C::Layout::KIND,
            header: C::Layout::HEADER,
            inlets: base.inlets().len(),
            outlets: base.outlets().len(),
            methods: base.methods()
                .map(| method | MethodDescription { name: method.name().to_string(), convention: method.convention() })
                .sorted_by(| a, b | a.name.cmp( &b.name ))
                .collect(),
            attributes: base.attributes()
                .map(| attribute | AttributeDescription {
                    name: attribute.name(),
                    label: attribute.label().to_string(),
                    datatype: attribute.datatype(),
                    range: attribute.range_string(),
                })
                .sorted_by(| a, b | a.name.as_str().cmp( b.name.as_str() ))
                .collect(),
        }
    }

    /// Methods the host calls through its own signature.
    pub fn host_managed_methods( &self ) -> impl Iterator<Item = &MethodDescription> {
        self.methods.iter().filter(| method | method.convention == CallingConvention::HostManaged )
    }

}
