use object_link::{ Atoms, HeaderKind, Layout, LayoutKind, Matrix, Perform, Sample, Wrapper };

use crate::components::{ Gain, Grid, Noise, OBJECT };
use crate::recording_host::{ HostCall, RecordingHost };

#[test]
fn perform_registers_signal_inlets() {

	let host = RecordingHost::new();
	let gain = Wrapper::<Gain>::new( host.clone(), OBJECT, &Atoms::new() ).unwrap();

	assert!( host.calls().contains( &HostCall::DspSetup { object: OBJECT, inlets: 2 }));
	assert!( !host.calls().iter().any(| call | matches!( call, HostCall::ProxyNew { .. })));
	assert_eq!( gain.header().kind(), HeaderKind::SignalObject );

}

#[test]
fn sample_registers_signal_inlets() {

	let host = RecordingHost::new();
	let noise = Wrapper::<Noise>::new( host.clone(), OBJECT, &Atoms::new() ).unwrap();

	assert_eq!( host.calls(), vec![
		HostCall::OutletNew { object: OBJECT, kind: "signal".to_string() },
		HostCall::DspSetup { object: OBJECT, inlets: 1 },
	]);
	assert_eq!( noise.header().kind(), HeaderKind::SignalObject );

}

#[test]
fn signal_objects_released_on_drop() {

	let host = RecordingHost::new();
	let gain = Wrapper::<Gain>::new( host.clone(), OBJECT, &Atoms::new() ).unwrap();
	let noise = Wrapper::<Noise>::new( host.clone(), OBJECT, &Atoms::new() ).unwrap();
	host.clear();

	drop( gain );
	assert_eq!( host.calls(), vec![ HostCall::DspFree { object: OBJECT }]);
	drop( noise );
	assert_eq!( host.calls().len(), 2 );

}

#[test]
fn matrix_binds_proxies_like_standard() {

	let host = RecordingHost::new();
	let grid = Wrapper::<Grid>::new( host.clone(), OBJECT, &Atoms::new() ).unwrap();

	assert_eq!( host.calls().len(), 1 );
	assert!( matches!( host.calls()[0], HostCall::ProxyNew { object: OBJECT, index: 1, .. }));
	let inlets = grid.object().base().inlets();
	assert!( inlets[0].proxy().is_none() );
	assert!( inlets[1].proxy().is_some() );
	assert_eq!( grid.header().kind(), HeaderKind::Object );

	host.clear();
	drop( grid );
	assert!( host.calls().is_empty() );

}

#[test]
fn layout_kinds() {
	assert_eq!( Perform::KIND, LayoutKind::Perform );
	assert_eq!( Sample::KIND, LayoutKind::Sample );
	assert_eq!( Matrix::KIND, LayoutKind::Matrix );
	assert_eq!( Matrix::HEADER, HeaderKind::Object );
	assert_eq!( LayoutKind::Sample.to_string(), "Sample" );
}
