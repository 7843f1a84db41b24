//! Adapters for the host's generic attribute ABI.
//!
//! The host registers one getter and one setter per class and calls them with the
//! host attribute object being accessed. Both resolve that object's name and forward
//! to the matching [`Attribute`]( crate::Attribute ). Names that resolve to nothing are
//! ignored, the same way [`Object::try_call`]( crate::Object::try_call ) ignores
//! unknown methods.

use pipe_trait::Pipe ;

use crate::atom::{ Atom, Atoms, Symbol };
use crate::host::{ AttributeObject, HostError };
use crate::layout::{ Component, Wrapper };



/// Signature of [`attr_get`].
pub type AttrGetter<C> = fn( &mut Wrapper<C>, AttributeObject, &mut usize, &mut Option<Vec<Atom>> ) -> Result<(), HostError> ;

/// Signature of [`attr_set`].
pub type AttrSetter<C> = fn( &mut Wrapper<C>, AttributeObject, &[Atom] ) -> Result<(), HostError> ;

fn resolve<C: Component>( wrapper: &Wrapper<C>, attribute: AttributeObject ) -> Option<Symbol> {
    let name = wrapper.object().base().host().attribute_name( attribute );
    if name.is_none() { tracing::trace!( attribute = attribute.raw(), "host attribute has no name" ) }
    name
}

/// Reads an attribute for the host.
///
/// The value comes from the attribute's getter if it has one, from the stored value
/// otherwise. It is copied into `storage`, reusing the buffer the host passed in or
/// allocating one when there is none, and `count` receives the number of atoms.
///
/// # Errors
/// Never fails; the `Result` is the host's status convention.
pub fn attr_get<C: Component>(
    wrapper: &mut Wrapper<C>,
    attribute: AttributeObject,
    count: &mut usize,
    storage: &mut Option<Vec<Atom>>,
) -> Result<(), HostError> {

    let Some( name ) = resolve( wrapper, attribute ) else { return Ok(()) };
    let Some( values ) = wrapper.object_mut().get_atoms( name ) else {
        tracing::trace!( attribute = %name, "get on unknown attribute ignored" );
        return Ok(())
    };

    *count = values.len();
    let buffer = storage.get_or_insert_with(|| Vec::with_capacity( values.len() ));
    buffer.clear();
    buffer.extend( values );
    Ok(())

}

/// Assigns an attribute for the host, through the attribute's normal assignment path.
///
/// # Errors
/// [`HostError::Generic`] if `args` (or the attribute's setter result) is empty.
pub fn attr_set<C: Component>(
    wrapper: &mut Wrapper<C>,
    attribute: AttributeObject,
    args: &[Atom],
) -> Result<(), HostError> {

    let Some( name ) = resolve( wrapper, attribute ) else { return Ok(()) };
    let object = wrapper.object_mut();
    if object.base().find_attribute( name.as_str() ).is_none() {
        tracing::trace!( attribute = %name, "set on unknown attribute ignored" );
        return Ok(())
    }

    args.pipe( Atoms::from )
        .pipe_ref(| args | object.set_atoms( name, args ))
        .map_err(| err | {
            tracing::debug!( attribute = %name, %err, "host assignment rejected" );
            HostError::Generic
        })

}

/// The bridge pair for `C`, ready to hand to the host's class registration.
pub fn bridge_functions<C: Component>() -> ( AttrGetter<C>, AttrSetter<C> ) {
    ( attr_get::<C>, attr_set::<C> )
}
