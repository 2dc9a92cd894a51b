//! Cartesian expansion of target declarations into concrete targets.
//!
//! Every combination of declared axis values becomes one [`Target`],
//! checked against the cross-axis legality rules. An illegal combination
//! is a hard error at expansion time, never a silent skip: if a
//! specification declares mobile tools builds, the author is told so.

use std::collections::BTreeSet;

use crate::declare::TargetDeclaration;
use crate::error::{Result, TargetError};
use crate::target::Target;

/// Expand declarations into the deduplicated, sorted set of concrete
/// targets.
///
/// Fails with [`TargetError::InvalidAxisCombination`] on the first
/// combination violating a legality rule, [`TargetError::EmptyAxis`] if a
/// declaration has nothing to expand on some axis, and
/// [`TargetError::NoValidTargets`] if nothing at all was declared.
pub fn expand(declarations: &[TargetDeclaration]) -> Result<Vec<Target>> {
    let mut targets = BTreeSet::new();

    for decl in declarations {
        if decl.optimizations.is_empty() {
            return Err(TargetError::EmptyAxis {
                platform: decl.platform.to_string(),
                axis: "optimization",
            });
        }
        if decl.tools.is_empty() {
            return Err(TargetError::EmptyAxis {
                platform: decl.platform.to_string(),
                axis: "tools",
            });
        }

        for optimization in decl.optimizations.iter() {
            for tools_enabled in decl.tools.iter() {
                let target = Target {
                    platform: decl.platform,
                    tooling: decl.tooling,
                    optimization,
                    tools_enabled,
                    abi: decl.abi,
                };
                check_legality(&target)?;
                targets.insert(target);
            }
        }
    }

    if targets.is_empty() {
        return Err(TargetError::NoValidTargets);
    }

    Ok(targets.into_iter().collect())
}

/// Cross-axis legality rules.
///
/// Each rule rejects one impossible pairing; the set is small and
/// closed, matching the axes this crate defines.
fn check_legality(target: &Target) -> Result<()> {
    if target.tools_enabled && !target.platform.is_desktop() {
        return Err(illegal(target, "tools builds require a desktop platform"));
    }
    if !target.platform.is_desktop() && target.abi.is_none() {
        return Err(illegal(target, "android targets require an ABI fragment"));
    }
    if target.abi.is_some() && target.platform.is_desktop() {
        return Err(illegal(
            target,
            "ABI fragments are only valid on android targets",
        ));
    }
    Ok(())
}

fn illegal(target: &Target, reason: &str) -> TargetError {
    TargetError::InvalidAxisCombination {
        target: target.name(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::{AndroidAbi, Optimization, Platform, ToolingProfile};
    use crate::declare::{OptimizationSet, ToolsSet};

    #[test]
    fn win64_full_expands_to_four() {
        let targets = expand(&[TargetDeclaration::win64_full()]).unwrap();
        assert_eq!(targets.len(), 4);
        assert!(targets.iter().all(|t| t.platform == Platform::Win64));
    }

    #[test]
    fn android_expands_to_two() {
        let targets = expand(&[TargetDeclaration::android_arm64()]).unwrap();
        assert_eq!(targets.len(), 2);
        assert!(targets.iter().all(|t| !t.tools_enabled));
        assert!(targets.iter().all(|t| t.abi == Some(AndroidAbi::Arm64V8a)));
    }

    #[test]
    fn combined_declarations_dedup_and_sort() {
        let decls = [
            TargetDeclaration::win64_full(),
            TargetDeclaration::win64_full(),
            TargetDeclaration::android_arm64(),
        ];
        let targets = expand(&decls).unwrap();
        assert_eq!(targets.len(), 6);
        let mut sorted = targets.clone();
        sorted.sort();
        assert_eq!(targets, sorted);
    }

    #[test]
    fn expansion_order_does_not_change_set() {
        let forward = expand(&[
            TargetDeclaration::win64_full(),
            TargetDeclaration::android_arm64(),
        ])
        .unwrap();
        let backward = expand(&[
            TargetDeclaration::android_arm64(),
            TargetDeclaration::win64_full(),
        ])
        .unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn android_tools_is_rejected() {
        let decl = TargetDeclaration {
            platform: Platform::Android,
            tooling: ToolingProfile::Vs2022,
            optimizations: OptimizationSet::all(),
            tools: ToolsSet::all(),
            abi: Some(AndroidAbi::Arm64V8a),
        };
        let err = expand(&[decl]).unwrap_err();
        assert!(matches!(err, TargetError::InvalidAxisCombination { .. }));
    }

    #[test]
    fn android_without_abi_is_rejected() {
        let decl = TargetDeclaration {
            abi: None,
            ..TargetDeclaration::android_arm64()
        };
        let err = expand(&[decl]).unwrap_err();
        assert!(matches!(err, TargetError::InvalidAxisCombination { .. }));
    }

    #[test]
    fn abi_on_desktop_is_rejected() {
        let decl = TargetDeclaration {
            abi: Some(AndroidAbi::Arm64V8a),
            ..TargetDeclaration::win64_full()
        };
        let err = expand(&[decl]).unwrap_err();
        assert!(matches!(err, TargetError::InvalidAxisCombination { .. }));
    }

    #[test]
    fn empty_declaration_list_yields_no_valid_targets() {
        let err = expand(&[]).unwrap_err();
        assert!(matches!(err, TargetError::NoValidTargets));
    }

    #[test]
    fn empty_axis_is_reported() {
        let decl = TargetDeclaration {
            optimizations: OptimizationSet::empty(),
            ..TargetDeclaration::win64_full()
        };
        let err = expand(&[decl]).unwrap_err();
        assert!(matches!(
            err,
            TargetError::EmptyAxis {
                axis: "optimization",
                ..
            }
        ));
    }

    #[test]
    fn expansion_is_deterministic() {
        let decls = [
            TargetDeclaration::win64_full(),
            TargetDeclaration::android_arm64(),
        ];
        assert_eq!(expand(&decls).unwrap(), expand(&decls).unwrap());
    }

    #[test]
    fn resolved_targets_are_single_valued() {
        let targets = expand(&[TargetDeclaration::win64_full()]).unwrap();
        let debugs: Vec<_> = targets
            .iter()
            .filter(|t| t.optimization == Optimization::Debug)
            .collect();
        let releases: Vec<_> = targets
            .iter()
            .filter(|t| t.optimization == Optimization::Release)
            .collect();
        assert_eq!(debugs.len(), 2);
        assert_eq!(releases.len(), 2);
    }
}
