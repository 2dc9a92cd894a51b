//! Public/private settings propagation across the dependency graph.
//!
//! A public edge carries the dependency's exported settings (defines,
//! include paths) to the dependant *and* onward to the dependant's own
//! dependants; a private edge stops at the immediate dependant. Cycles
//! are detected up front by DFS and reported with the projects that
//! form them.

use std::collections::{BTreeMap, HashMap, HashSet};

use mason_config::{Configuration, ExportedSettings, Visibility};

use crate::error::{GraphError, Result};

/// Merge propagated dependency settings into every configuration.
///
/// Input maps project name to its own resolved configuration; output
/// maps the same names to effective configurations with dependency
/// exports absorbed. Fails on unresolved edges or cycles; never
/// infinite-loops.
pub fn propagate(
    configs: &BTreeMap<String, Configuration>,
) -> Result<BTreeMap<String, Configuration>> {
    check_edges(configs)?;
    check_cycles(configs)?;

    let mut export_cache: HashMap<String, ExportedSettings> = HashMap::new();
    let mut effective = BTreeMap::new();

    for (name, conf) in configs {
        let mut merged = conf.clone();
        for edge in &conf.dependencies {
            let exported = public_exports(&edge.project, configs, &mut export_cache);
            merged.absorb(&exported);
        }
        effective.insert(name.clone(), merged);
    }

    Ok(effective)
}

/// The settings a project exports to dependants: its own exported slice
/// plus, transitively, the exports of its *public* dependencies.
fn public_exports(
    name: &str,
    configs: &BTreeMap<String, Configuration>,
    cache: &mut HashMap<String, ExportedSettings>,
) -> ExportedSettings {
    if let Some(cached) = cache.get(name) {
        return cached.clone();
    }
    // Edges are pre-validated, so the lookup cannot miss.
    let conf = &configs[name];
    let mut exports = conf.exported();
    for edge in &conf.dependencies {
        if edge.visibility == Visibility::Public {
            let upstream = public_exports(&edge.project, configs, cache);
            exports.extend(&upstream);
        }
    }
    cache.insert(name.to_string(), exports.clone());
    exports
}

fn check_edges(configs: &BTreeMap<String, Configuration>) -> Result<()> {
    for (name, conf) in configs {
        for edge in &conf.dependencies {
            if !configs.contains_key(&edge.project) {
                return Err(GraphError::UnresolvedDependency {
                    dependant: name.clone(),
                    missing: edge.project.clone(),
                });
            }
        }
    }
    Ok(())
}

fn check_cycles(configs: &BTreeMap<String, Configuration>) -> Result<()> {
    let mut visited = HashSet::new();
    let mut stack = Vec::new();

    for name in configs.keys() {
        dfs(name, configs, &mut visited, &mut stack)?;
    }
    Ok(())
}

fn dfs(
    node: &str,
    configs: &BTreeMap<String, Configuration>,
    visited: &mut HashSet<String>,
    stack: &mut Vec<String>,
) -> Result<()> {
    if let Some(position) = stack.iter().position(|n| n == node) {
        let mut members: Vec<String> = stack[position..].to_vec();
        members.push(node.to_string());
        return Err(GraphError::CyclicDependency { members });
    }
    if visited.contains(node) {
        return Ok(());
    }

    visited.insert(node.to_string());
    stack.push(node.to_string());

    for edge in &configs[node].dependencies {
        dfs(&edge.project, configs, visited, stack)?;
    }

    stack.pop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mason_config::DependencyRef;
    use std::path::PathBuf;

    fn conf(defines: &[&str], includes: &[&str], deps: Vec<DependencyRef>) -> Configuration {
        let mut c = Configuration::new();
        for d in defines {
            c.defines.insert(d.to_string(), None);
        }
        for i in includes {
            c.include_paths.push(PathBuf::from(i));
        }
        c.dependencies = deps;
        c
    }

    #[test]
    fn public_dependency_contributes_exports() {
        let mut configs = BTreeMap::new();
        configs.insert(
            "Engine".to_string(),
            conf(&["ZENITH_VULKAN"], &["/r/Zenith"], vec![]),
        );
        configs.insert(
            "Game".to_string(),
            conf(
                &[],
                &["/r/Games/Sokoban"],
                vec![DependencyRef::public("Engine")],
            ),
        );

        let effective = propagate(&configs).unwrap();
        let game = &effective["Game"];
        assert!(game.has_define("ZENITH_VULKAN"));
        assert!(game.include_paths.contains(&PathBuf::from("/r/Zenith")));
        // Own paths keep priority over absorbed ones.
        assert_eq!(game.include_paths[0], PathBuf::from("/r/Games/Sokoban"));
    }

    #[test]
    fn public_exports_flow_transitively() {
        let mut configs = BTreeMap::new();
        configs.insert("Core".to_string(), conf(&["CORE"], &["/r/Core"], vec![]));
        configs.insert(
            "Engine".to_string(),
            conf(
                &["ENGINE"],
                &["/r/Engine"],
                vec![DependencyRef::public("Core")],
            ),
        );
        configs.insert(
            "Game".to_string(),
            conf(&[], &[], vec![DependencyRef::public("Engine")]),
        );

        let effective = propagate(&configs).unwrap();
        let game = &effective["Game"];
        assert!(game.has_define("ENGINE"));
        assert!(game.has_define("CORE"), "public exports must chain");
    }

    #[test]
    fn private_dependency_stops_at_immediate_dependant() {
        let mut configs = BTreeMap::new();
        configs.insert("Core".to_string(), conf(&["CORE"], &[], vec![]));
        configs.insert(
            "Engine".to_string(),
            conf(&["ENGINE"], &[], vec![DependencyRef::private("Core")]),
        );
        configs.insert(
            "Game".to_string(),
            conf(&[], &[], vec![DependencyRef::public("Engine")]),
        );

        let effective = propagate(&configs).unwrap();
        assert!(effective["Engine"].has_define("CORE"));
        let game = &effective["Game"];
        assert!(game.has_define("ENGINE"));
        assert!(!game.has_define("CORE"), "private exports must not chain");
    }

    #[test]
    fn two_node_cycle_is_reported_with_members() {
        let mut configs = BTreeMap::new();
        configs.insert(
            "A".to_string(),
            conf(&[], &[], vec![DependencyRef::public("B")]),
        );
        configs.insert(
            "B".to_string(),
            conf(&[], &[], vec![DependencyRef::public("A")]),
        );

        let err = propagate(&configs).unwrap_err();
        match err {
            GraphError::CyclicDependency { members } => {
                assert!(members.contains(&"A".to_string()));
                assert!(members.contains(&"B".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn self_cycle_is_reported() {
        let mut configs = BTreeMap::new();
        configs.insert(
            "A".to_string(),
            conf(&[], &[], vec![DependencyRef::public("A")]),
        );
        let err = propagate(&configs).unwrap_err();
        assert!(matches!(err, GraphError::CyclicDependency { .. }));
    }

    #[test]
    fn unresolved_edge_is_reported() {
        let mut configs = BTreeMap::new();
        configs.insert(
            "Game".to_string(),
            conf(&[], &[], vec![DependencyRef::public("Engine")]),
        );
        let err = propagate(&configs).unwrap_err();
        match err {
            GraphError::UnresolvedDependency { dependant, missing } => {
                assert_eq!(dependant, "Game");
                assert_eq!(missing, "Engine");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn diamond_graph_is_not_a_cycle() {
        let mut configs = BTreeMap::new();
        configs.insert("Core".to_string(), conf(&["CORE"], &[], vec![]));
        configs.insert(
            "Render".to_string(),
            conf(&[], &[], vec![DependencyRef::public("Core")]),
        );
        configs.insert(
            "Audio".to_string(),
            conf(&[], &[], vec![DependencyRef::public("Core")]),
        );
        configs.insert(
            "Game".to_string(),
            conf(
                &[],
                &[],
                vec![
                    DependencyRef::public("Render"),
                    DependencyRef::public("Audio"),
                ],
            ),
        );

        let effective = propagate(&configs).unwrap();
        assert!(effective["Game"].has_define("CORE"));
    }
}
