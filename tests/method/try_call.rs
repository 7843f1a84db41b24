use object_link::{ atoms, Atoms, Wrapper };

use crate::components::{ Counter, OBJECT };
use crate::recording_host::RecordingHost ;

#[test]
fn try_call_returns_body_result() {

	let host = RecordingHost::new();
	let mut counter = Wrapper::<Counter>::new( host.clone(), OBJECT, &atoms![ 10 ]).unwrap();

	assert_eq!( counter.try_call( "bang", &Atoms::new() ), atoms![ 11 ]);
	assert_eq!( counter.try_call( "bang", &Atoms::new() ), atoms![ 12 ]);
	assert_eq!( counter.object().component().count, 12 );

}

#[test]
fn try_call_forwards_every_argument() {

	let host = RecordingHost::new();
	let mut counter = Wrapper::<Counter>::new( host, OBJECT, &Atoms::new() ).unwrap();

	assert_eq!( counter.try_call( "echo", &Atoms::new() ), Atoms::new() );
	assert_eq!( counter.try_call( "echo", &atoms![ 1, 2.5, "three" ]), atoms![ 1, 2.5, "three" ]);
	assert_eq!( counter.object_mut().try_call_one( "echo", "solo" ), atoms![ "solo" ]);

}

#[test]
fn try_call_unknown_name_is_empty() {

	let host = RecordingHost::new();
	let mut counter = Wrapper::<Counter>::new( host.clone(), OBJECT, &Atoms::new() ).unwrap();
	host.clear();

	assert_eq!( counter.try_call( "nonexistent", &atoms![ 1 ]), Atoms::new() );
	assert!( host.calls().is_empty(), "unknown method reached the host: {:?}", host.calls() );
	assert_eq!( counter.object().component().count, 0 );

}

#[test]
fn empty_result_and_unknown_method_told_apart_by_has_method() {

	let host = RecordingHost::new();
	let mut counter = Wrapper::<Counter>::new( host, OBJECT, &Atoms::new() ).unwrap();

	assert_eq!( counter.try_call( "reset", &Atoms::new() ), counter.try_call( "missing", &Atoms::new() ));
	assert!( counter.object().base().has_method( "reset" ));
	assert!( !counter.object().base().has_method( "missing" ));

}

#[test]
fn method_can_be_called_repeatedly() {

	let host = RecordingHost::new();
	let mut counter = Wrapper::<Counter>::new( host, OBJECT, &Atoms::new() ).unwrap();

	for expected in 1..=5 {
		assert_eq!( counter.try_call( "bang", &Atoms::new() ), atoms![ expected ]);
	}
	assert!( counter.object().base().find_method( "bang" ).is_some() );

}
