use object_link::{ atoms, canonical_method_name, Atoms, CallingConvention, Wrapper };

use crate::components::{ Collisions, Counter, OBJECT };
use crate::recording_host::RecordingHost ;

#[test]
fn integer_registers_as_int() {

	let host = RecordingHost::new();
	let mut counter = Wrapper::<Counter>::new( host, OBJECT, &Atoms::new() ).unwrap();

	assert_eq!( counter.try_call( "int", &atoms![ 42 ]), atoms![ 42 ]);
	assert_eq!( counter.try_call( "integer", &atoms![ 7 ]), Atoms::new() );
	assert!( !counter.object().base().has_method( "integer" ));
	assert_eq!( counter.object().component().count, 42 );

}

#[test]
fn number_registers_as_float() {

	let host = RecordingHost::new();
	let mut collisions = Wrapper::<Collisions>::new( host, OBJECT, &Atoms::new() ).unwrap();

	assert_eq!( collisions.try_call( "float", &atoms![ 1.5 ]), atoms![ 3.0 ]);
	assert_eq!( collisions.try_call( "number", &atoms![ 1.5 ]), Atoms::new() );
	assert!( !collisions.object().base().has_method( "number" ));

}

#[test]
fn structural_callbacks_are_host_managed() {

	let host = RecordingHost::new();
	let collisions = Wrapper::<Collisions>::new( host, OBJECT, &Atoms::new() ).unwrap();
	let base = collisions.object().base();

	for name in [ "dsp64", "dblclick" ] {
		match base.find_method( name ).map(| method | method.convention() ) {
			Some( CallingConvention::HostManaged ) => {}
			value => panic!( "Expected {} to be host managed, found: {:?}", name, value ),
		}
	}
	for name in [ "bang", "int", "float", "silent" ] {
		assert_eq!( base.find_method( name ).map(| method | method.convention() ), Some( CallingConvention::Generic ));
	}

}

#[test]
fn host_managed_methods_remain_callable() {

	let host = RecordingHost::new();
	let mut collisions = Wrapper::<Collisions>::new( host, OBJECT, &Atoms::new() ).unwrap();

	assert_eq!( collisions.try_call( "dblclick", &Atoms::new() ), atoms![ "opened" ]);

}

#[test]
fn canonical_names() {
	assert_eq!( canonical_method_name( "integer" ), ( "int", CallingConvention::Generic ));
	assert_eq!( canonical_method_name( "number" ), ( "float", CallingConvention::Generic ));
	assert_eq!( canonical_method_name( "int" ), ( "int", CallingConvention::Generic ));
	assert_eq!( canonical_method_name( "edclose" ), ( "edclose", CallingConvention::HostManaged ));
	assert_eq!( canonical_method_name( "okclose" ), ( "okclose", CallingConvention::HostManaged ));
	assert_eq!( canonical_method_name( "patchlineupdate" ), ( "patchlineupdate", CallingConvention::HostManaged ));
	assert_eq!( canonical_method_name( "DSP64" ), ( "DSP64", CallingConvention::Generic ));
}
