// tests/demos_recipe.rs

use std::collections::HashSet;
use std::error::Error;
use std::path::PathBuf;

use layerdag::config::load_and_validate;

type TestResult = Result<(), Box<dyn Error>>;

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn recipe_demo_yields_five_layers() -> TestResult {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let manifest = load_and_validate(manifest_dir.join("demos/recipe.toml"))?;

    assert_eq!(manifest.graph.name.as_deref(), Some("recipe"));
    assert_eq!(manifest.description_of("cake"), Some("the end goal"));

    let graph = manifest.build_graph()?;
    assert_eq!(
        graph.topo_sorted_layers(),
        vec![
            set(&["soil", "water"]),
            set(&["grain"]),
            set(&["flour", "chickens"]),
            set(&["eggs"]),
            set(&["cake"]),
        ]
    );
    Ok(())
}
