use object_link::{ atoms, Atoms, AttributeConfig, Component, ObjectBase, ObjectError, Standard, Symbol, Wrapper };

use crate::components::{ Mixer, OBJECT };
use crate::recording_host::RecordingHost ;

#[test]
fn setter_result_first_atom_is_stored() {

	let host = RecordingHost::new();
	let mut mixer = Wrapper::<Mixer>::new( host, OBJECT, &Atoms::new() ).unwrap();
	let level = mixer.object().component().level ;
	let object = mixer.object_mut();

	object.set_atoms( level.name(), &atoms![ 4.0 ]).unwrap();
	assert_eq!( object.base().get( level ).unwrap(), 1.0 );

	object.set( level, -3.0 ).unwrap();
	assert_eq!( object.base().get( level ).unwrap(), 0.0 );

	object.set( level, 0.25 ).unwrap();
	assert_eq!( object.base().get( level ).unwrap(), 0.25 );

}

#[test]
fn setter_updates_component_state() {

	let host = RecordingHost::new();
	let mut mixer = Wrapper::<Mixer>::new( host, OBJECT, &Atoms::new() ).unwrap();
	let level = mixer.object().component().level ;

	mixer.object_mut().set_atoms( level.name(), &atoms![ 4.0 ]).unwrap();
	mixer.object_mut().set( level, 0.75 ).unwrap();
	mixer.object_mut().set( level, -2.0 ).unwrap();

	assert_eq!( mixer.object().component().clipped, vec![ 4.0, -2.0 ]);

}

/// Its setter rejects everything, including the default.
struct Muted { muted: bool }

impl Component for Muted {
	type Layout = Standard ;
	fn construct( object: &mut ObjectBase<Self>, _args: &Atoms ) -> Result<Self, ObjectError> {
		object.attribute( "volume", 9_i64, AttributeConfig::new()
			.setter(| muted: &mut Muted, _: &Atoms | {
				muted.muted = true ;
				Atoms::new()
			}))?;
		Ok( Self { muted: false })
	}
}

#[test]
fn setter_rejecting_default_keeps_raw_default() {

	let host = RecordingHost::new();
	let mut muted = Wrapper::<Muted>::new( host, OBJECT, &Atoms::new() ).unwrap();

	assert!( muted.object().component().muted );
	assert_eq!( muted.object().base().find_attribute( "volume" ).unwrap().to_atoms(), atoms![ 9 ]);
	assert!( muted.object_mut().set_atoms( Symbol::new( "volume" ), &atoms![ 1 ]).is_err() );
	assert_eq!( muted.object().base().find_attribute( "volume" ).unwrap().to_atoms(), atoms![ 9 ]);

}

#[test]
fn getter_sees_component_and_serves_host_reads_only() {

	let host = RecordingHost::new();
	let mut mixer = Wrapper::<Mixer>::new( host, OBJECT, &Atoms::new() ).unwrap();
	let ( report, level ) = ( mixer.object().component().report, mixer.object().component().level );
	let object = mixer.object_mut();

	object.set( report, 5 ).unwrap();
	assert_eq!( object.base().get( report ).unwrap(), 5 );
	assert_eq!( object.base().find_attribute( "report" ).unwrap().to_atoms(), atoms![ 5 ]);
	assert_eq!( object.get_atoms( report.name() ), Some( atoms![ "clipped", 0 ]));

	object.set( level, 3.0 ).unwrap();
	assert_eq!( object.get_atoms( report.name() ), Some( atoms![ "clipped", 1 ]));
	assert_eq!( object.get_atoms( level.name() ), Some( atoms![ 1.0 ]));

}
