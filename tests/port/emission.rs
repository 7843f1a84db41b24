use object_link::{ atoms, Atom, Atoms, HostError, ObjectError, OutletId, Symbol, Wrapper };

use crate::components::{ Counter, OBJECT };
use crate::recording_host::{ HostCall, RecordingHost };

fn fixture() -> ( std::rc::Rc<RecordingHost>, Wrapper<Counter> ) {
	let host = RecordingHost::new();
	let counter = Wrapper::<Counter>::new( host.clone(), OBJECT, &Atoms::new() ).unwrap();
	host.clear();
	( host, counter )
}

#[test]
fn float_emission() {

	let ( host, counter ) = fixture();
	let base = counter.object().base();
	let out = counter.object().component().out ;
	let outlet = base.outlets()[0].handle();

	base.send( out, 0.25 ).unwrap();
	assert_eq!( host.emissions(), vec![ HostCall::OutletFloat { outlet, value: 0.25 }]);

}

#[test]
fn selector_emissions() {

	let ( host, counter ) = fixture();
	let base = counter.object().base();
	let out = counter.object().component().out ;
	let outlet = base.outlets()[0].handle();

	base.send( out, "bang" ).unwrap();
	base.send( out, ( Symbol::new( "set" ), Symbol::new( "ramp" ))).unwrap();
	base.send( out, ( Symbol::new( "gain" ), 0.5 )).unwrap();
	base.send( out, ( Symbol::new( "list" ), atoms![ 1, 2.5, "three" ])).unwrap();

	assert_eq!( host.emissions(), vec![
		HostCall::OutletAnything { outlet, selector: Symbol::new( "bang" ), args: vec![] },
		HostCall::OutletAnything { outlet, selector: Symbol::new( "set" ), args: vec![ Atom::from( "ramp" ) ] },
		HostCall::OutletAnything { outlet, selector: Symbol::new( "gain" ), args: vec![ Atom::Float( 0.5 ) ] },
		HostCall::OutletAnything { outlet, selector: Symbol::new( "list" ), args: vec![ Atom::Int( 1 ), Atom::Float( 2.5 ), Atom::from( "three" ) ] },
	]);

}

#[test]
fn method_emits_through_outlet() {

	let ( host, mut counter ) = fixture();
	counter.try_call( "bang", &Atoms::new() );
	counter.try_call( "bang", &Atoms::new() );

	let values = host.emissions().into_iter()
		.filter_map(| call | match call {
			HostCall::OutletFloat { value, .. } => Some( value ),
			_ => None,
		})
		.collect::<Vec<_>>();
	assert_eq!( values, vec![ 1.0, 2.0 ]);

}

#[test]
fn host_failure_propagates() {

	let ( host, counter ) = fixture();
	host.fail_emissions_with( HostError::OutOfMemory );
	let out = counter.object().component().out ;

	match counter.object().base().send( out, 1.0 ) {
		Err( ObjectError::Host( HostError::OutOfMemory )) => {},
		value => panic!( "Expected OutOfMemory error, found: {:#?}", value ),
	}
	assert_eq!( host.emissions().len(), 1 );

}

#[test]
fn foreign_outlet_rejected() {

	let ( host, counter ) = fixture();

	match counter.object().base().send( OutletId::from_index( 4 ), 1.0 ) {
		Err( ObjectError::UnknownOutlet( 4 )) => {},
		value => panic!( "Expected UnknownOutlet error, found: {:#?}", value ),
	}
	assert!( host.calls().is_empty() );

}
