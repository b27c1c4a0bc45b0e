//! Property tests: round-trip law, determinism, and no panics on noise.

use portspec::api::{ExposedPorts, PortSpec, PortSpecCodec};
use portspec::{render, text, Pipeline, RecordCodec, RenderOptions, Stage};
use proptest::prelude::*;

fn port_spec() -> impl Strategy<Value = PortSpec> {
    (
        any::<u32>(),
        prop_oneof![Just(0), Just(1), any::<i32>()],
        ".{0,40}",
        prop_oneof![Just(0), Just(1), any::<i32>()],
    )
        .prop_map(|(port, visibility, url, protocol)| PortSpec {
            port,
            visibility,
            url,
            protocol,
        })
}

fn exposed_ports() -> impl Strategy<Value = ExposedPorts> {
    prop::collection::vec(port_spec(), 0..6).prop_map(|ports| ExposedPorts { ports })
}

fn options() -> impl Strategy<Value = RenderOptions> {
    (prop_oneof![Just(""), Just("  "), Just("\t"), Just("    ")], any::<bool>()).prop_map(
        |(indent, enums_as_numbers)| {
            RenderOptions::new()
                .with_indent(indent)
                .with_enums_as_numbers(enums_as_numbers)
        },
    )
}

proptest! {
    #[test]
    fn decode_of_encode_renders_identically(record in exposed_ports(), options in options()) {
        let blob = text::encode(&PortSpecCodec.encode(&record));
        let pipeline = Pipeline::new(PortSpecCodec, options.clone());
        let via_pipeline = pipeline.run(&blob).unwrap();
        let direct = render(&record, &options).unwrap();
        prop_assert_eq!(via_pipeline, direct);
    }

    #[test]
    fn rendering_is_deterministic(record in exposed_ports()) {
        let blob = record.to_base64();
        let first = portspec::decode_portspec(&blob).unwrap();
        let second = portspec::decode_portspec(&blob).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        match portspec::decode_portspec(&text::encode(&bytes)) {
            Ok(json) => prop_assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok()),
            Err(err) => prop_assert_eq!(err.stage(), Stage::Record),
        }
    }

    #[test]
    fn arbitrary_text_never_panics(input in ".{0,32}") {
        let _ = portspec::decode_portspec(&input);
    }
}
