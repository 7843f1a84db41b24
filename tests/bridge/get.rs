use object_link::bridge::{ attr_get, bridge_functions };
use object_link::{ atoms, Atom, Atoms, AttributeObject, Symbol, Wrapper };

use crate::components::{ Counter, Mixer, OBJECT };
use crate::recording_host::RecordingHost ;

#[test]
fn get_allocates_storage_when_absent() {

	let host = RecordingHost::new();
	let step = host.register_attribute( "step" );
	let mut counter = Wrapper::<Counter>::new( host, OBJECT, &Atoms::new() ).unwrap();

	let mut count = 0 ;
	let mut storage = None ;
	attr_get( &mut counter, step, &mut count, &mut storage ).unwrap();

	assert_eq!( count, 1 );
	assert_eq!( storage, Some( vec![ Atom::Int( 1 ) ]));

}

#[test]
fn get_reuses_host_buffer() {

	let host = RecordingHost::new();
	let mode = host.register_attribute( "mode" );
	let mut mixer = Wrapper::<Mixer>::new( host, OBJECT, &Atoms::new() ).unwrap();

	let mut count = 0 ;
	let mut storage = Some( Vec::with_capacity( 8 ));
	if let Some( buffer ) = storage.as_mut() { buffer.push( Atom::Int( -1 )) }
	attr_get( &mut mixer, mode, &mut count, &mut storage ).unwrap();

	assert_eq!( count, 1 );
	let buffer = storage.expect( "storage was dropped" );
	assert_eq!( buffer, vec![ Atom::from( "linear" ) ]);
	assert!( buffer.capacity() >= 8 );

}

#[test]
fn get_goes_through_getter() {

	let host = RecordingHost::new();
	let report = host.register_attribute( "report" );
	let mut mixer = Wrapper::<Mixer>::new( host, OBJECT, &Atoms::new() ).unwrap();

	let mut count = 0 ;
	let mut storage = None ;
	attr_get( &mut mixer, report, &mut count, &mut storage ).unwrap();

	assert_eq!( count, 2 );
	assert_eq!( storage.map( Atoms::from ), Some( atoms![ "clipped", 0 ]));

}

#[test]
fn get_reflects_latest_assignment() {

	let host = RecordingHost::new();
	let label = host.register_attribute( "label" );
	let ( getter, _ ) = bridge_functions::<Counter>();
	let mut counter = Wrapper::<Counter>::new( host, OBJECT, &Atoms::new() ).unwrap();
	let key = counter.object().component().label ;
	counter.object_mut().set( key, Symbol::new( "beats" )).unwrap();

	let mut count = 0 ;
	let mut storage = None ;
	getter( &mut counter, label, &mut count, &mut storage ).unwrap();
	assert_eq!( storage, Some( vec![ Atom::from( "beats" ) ]));

}

#[test]
fn get_ignores_unknown_and_unnamed_attributes() {

	let host = RecordingHost::new();
	let missing = host.register_attribute( "missing" );
	let mut counter = Wrapper::<Counter>::new( host, OBJECT, &Atoms::new() ).unwrap();

	for attribute in [ missing, AttributeObject::new( 31337 ) ] {
		let mut count = 9 ;
		let mut storage = None ;
		attr_get( &mut counter, attribute, &mut count, &mut storage ).unwrap();
		assert_eq!( count, 9 );
		assert!( storage.is_none() );
	}

}
