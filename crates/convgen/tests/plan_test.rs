use std::path::Path;

use proptest::prelude::*;

use convgen::converter::parse_converter;
use convgen::{ConfigError, ErrorKind, Format, Location, Manifest, Planner, PlannerConfig, RawConverter, RawLines, StaticLoader};

const MANIFEST: &str = r#"{
    "global": ["enum:exclude Status"],
    "packages": {
        "example.com/orders": {
            "name": "orders",
            "types": ["Converter", "Other"],
            "functions": [
                { "name": "CentsToString", "params": [{ "name": "c", "type": "int64" }], "result": "string" },
                { "name": "FormatTime", "params": [{ "name": "t", "type": "time.Time" }, { "name": "ctx", "type": "string" }], "result": "string" }
            ]
        }
    },
    "declarations": [
        { "package": "example.com/orders", "file": "convert.go", "line": 5, "interface": "Converter",
          "lines": ["converter", "output:package example.com/orders/gen:gen", "extend CentsToString"] },
        { "package": "example.com/orders", "file": "orders.go", "line": 20, "lines": ["variables"] },
        { "package": "example.com/orders", "file": "other.go", "line": 2, "interface": "Other",
          "lines": ["converter", "output:package example.com/orders/gen:gen", "output:format function"] }
    ]
}"#;

fn manifest() -> Manifest {
    Manifest::parse(MANIFEST, Path::new("manifest.json")).unwrap()
}

fn planner(manifest: &Manifest) -> Planner {
    Planner::new(PlannerConfig::default(), Box::new(StaticLoader::from_manifest(manifest)))
}

fn lines(values: &[&str]) -> RawLines {
    RawLines::new(
        Location::origin("<command line>"),
        values.iter().map(|v| v.to_string()).collect(),
    )
}

fn declaration(interface: Option<&str>, local: &[&str]) -> RawConverter {
    RawConverter {
        package_path: "example.com/orders".to_string(),
        package_name: "orders".to_string(),
        file_name: "orders.go".to_string(),
        interface_name: interface.map(str::to_string),
        converter: RawLines::new(
            Location::new("orders.go", Some(1)),
            local.iter().map(|v| v.to_string()).collect(),
        ),
    }
}

#[test]
fn plan_groups_by_package_id() {
    let manifest = manifest();
    let path = Path::new("manifest.json");
    let plan = planner(&manifest)
        .plan(&manifest.global_lines(path), &manifest.raw_converters(path).unwrap())
        .unwrap();

    assert_eq!(plan.converter_count(), 3);
    let generated = plan.get("example.com/orders/gen:gen").unwrap();
    assert_eq!(generated.len(), 2);
    assert_eq!(generated[0].config.name, "ConverterImpl");
    assert_eq!(generated[0].config.extend[0].id(), "example.com/orders.CentsToString");
    assert_eq!(generated[1].config.output_format, Format::Function);

    let vars = plan.get("example.com/orders:orders").unwrap();
    assert_eq!(vars[0].config.output_file, "orders.gen.go");
    assert!(vars[0].config.common.enum_settings.excludes[0].matches("example.com/orders", "Status"));
}

#[test]
fn plan_rejects_duplicate_struct_names() {
    let manifest = manifest();
    let first = declaration(Some("Converter"), &["name Shared"]);
    let second = declaration(Some("Other"), &["name Shared"]);

    let err = planner(&manifest).plan(&lines(&[]), &[first, second]).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateConverter { ref name, .. } if name == "Shared"));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn same_interface_name_in_two_packages() {
    let manifest = Manifest::parse(
        r#"{
            "packages": {
                "example.com/a": { "name": "a", "types": ["Converter"] },
                "example.com/b": { "name": "b", "types": ["Converter"] }
            },
            "declarations": [
                { "package": "example.com/a", "file": "a.go", "line": 3, "interface": "Converter", "lines": ["converter"] },
                { "package": "example.com/b", "file": "b.go", "line": 3, "interface": "Converter", "lines": ["converter"] }
            ]
        }"#,
        Path::new("manifest.json"),
    )
    .unwrap();
    let path = Path::new("manifest.json");
    let plan = planner(&manifest)
        .plan(&manifest.global_lines(path), &manifest.raw_converters(path).unwrap())
        .unwrap();

    assert_eq!(plan.converter_count(), 2);
    let a = plan.get("example.com/a/generated:generated").unwrap();
    let b = plan.get("example.com/b/generated:generated").unwrap();
    assert_eq!(a[0].config.name, "ConverterImpl");
    assert_eq!(a[0].package, "example.com/a");
    assert_eq!(b[0].config.name, "ConverterImpl");
    assert_eq!(b[0].package, "example.com/b");
}

#[test]
fn plan_serializes_to_json() {
    let manifest = manifest();
    let plan = planner(&manifest)
        .plan(&lines(&["output:format method Impl"]), &[declaration(Some("Converter"), &[])])
        .unwrap();

    let json = serde_json::to_value(&plan).unwrap();
    let converter = &json["packages"]["example.com/orders/generated:generated"][0];
    assert_eq!(converter["output_format"], "method");
    assert_eq!(converter["output_receiver"], "Impl");
    assert_eq!(converter["subject_type"]["name"], "Converter");
    assert_eq!(converter["common"]["arg_context_regex"], "^ctx|^context");
}

#[test]
fn receiver_survives_later_directives() {
    let manifest = manifest();
    let err = planner(&manifest)
        .build(&declaration(Some("Converter"), &[]), &lines(&["output:format method X Y"]))
        .unwrap_err();
    assert!(err.to_string().contains("expected two values but got 3"));

    let c = planner(&manifest)
        .build(
            &declaration(Some("Converter"), &["output:raw a", "enum no", "output:package x:y", "extend FormatTime"]),
            &lines(&["output:format method Y"]),
        )
        .unwrap();
    assert_eq!(c.config.output_receiver, "Y");
}

#[test]
fn format_frozen_after_extend_in_earlier_scope() {
    let manifest = manifest();
    let err = planner(&manifest)
        .build(
            &declaration(Some("Converter"), &["output:format function"]),
            &lines(&["extend CentsToString"]),
        )
        .unwrap_err();
    assert!(matches!(err.root(), ConfigError::FormatFrozen));
    assert!(err.to_string().contains("example.com/orders.Converter"));
}

#[test]
fn name_depends_on_format() {
    let manifest = manifest();
    let planner = planner(&manifest);

    let err = planner.build(&declaration(None, &["name \"Foo\""]), &lines(&[])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let c = planner.build(&declaration(Some("Converter"), &["name \"Foo\""]), &lines(&[])).unwrap();
    assert_eq!(c.config.name, "Foo");
}

#[test]
fn builds_run_concurrently() {
    let manifest = manifest();
    let planner = &planner(&manifest);
    let global = &lines(&["enum no"]);
    let declarations: Vec<_> = (0..8)
        .map(|i| {
            let line = format!("output:file out{i}.go");
            declaration(Some("Converter"), &[line.as_str()])
        })
        .collect();

    let files: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = declarations
            .iter()
            .map(|raw| scope.spawn(move || planner.build(raw, global).unwrap().config.output_file))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(files[3], "out3.go");
    assert_eq!(files.len(), 8);
}

const POOL: &[&str] = &[
    "converter",
    "output:raw // line",
    "output:file a.go",
    "output:file \"b.go\"",
    "output:package p",
    "output:package p:n",
    "output:format struct",
    "output:format function",
    "output:format method R",
    "name Custom",
    "struct:comment note",
    "enum no",
    "enum yes",
    "wrapErrors",
    "enum:exclude Status",
    "extend CentsToString",
];

proptest! {
    #[test]
    fn global_then_local_equals_concatenation(
        global in prop::collection::vec(prop::sample::select(POOL.to_vec()), 0..6),
        local in prop::collection::vec(prop::sample::select(POOL.to_vec()), 0..6),
    ) {
        let manifest = manifest();
        let loader = StaticLoader::from_manifest(&manifest);
        let config = PlannerConfig::default();

        let split = parse_converter(&loader, &config, &declaration(Some("Converter"), &local), &lines(&global));

        let mut joined_lines = global.clone();
        joined_lines.extend(local.iter().copied());
        let joined = parse_converter(&loader, &config, &declaration(Some("Converter"), &[]), &lines(&joined_lines));

        match (split, joined) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::to_value(&b).unwrap());
            }
            (Err(a), Err(b)) => {
                prop_assert_eq!(a.root().to_string(), b.root().to_string());
            }
            (a, b) => prop_assert!(false, "outcomes differ: {:?} vs {:?}", a.is_ok(), b.is_ok()),
        }
    }
}
