use object_link::{ Atoms, ObjectError, Wrapper };

use crate::components::{ Broken, OBJECT };
use crate::recording_host::RecordingHost ;

#[test]
fn failed_construction_reported_without_setup() {

	let host = RecordingHost::new();

	match Wrapper::<Broken>::new( host.clone(), OBJECT, &Atoms::new() ) {
		Err( ObjectError::UnknownInlet( index )) => assert_eq!( index, 3 ),
		Err( error ) => panic!( "Expected UnknownInlet error, found: {:#?}", error ),
		Ok( _ ) => panic!( "Expected UnknownInlet error, found a constructed object" ),
	}
	assert!( host.calls().is_empty(), "unexpected host calls: {:#?}", host.calls() );

}
