//! Preset descriptors for the Zenith engine tree.
//!
//! These capture the authored build specification: the engine static
//! library, the parameterized game projects, the Windows-only tools
//! library, and the shader compiler. Each is ordinary descriptor data;
//! a build manifest can declare its own instead.

use mason_config::{fragments, Condition, DependencyRef, OutputType, Patch, RuleSet};
use mason_targets::Platform;

use crate::descriptor::ProjectDescriptor;
use crate::error::Result;

/// Static excludes shared by descriptors that pull in the Jolt Physics
/// middleware tree.
fn jolt_excludes() -> Vec<&'static str> {
    vec![
        r".*JoltPhysics-5\.4\.0/Build.*",
        r".*JoltPhysics-5\.4\.0/Docs.*",
        r".*JoltPhysics-5\.4\.0/UnitTests.*",
        r".*JoltPhysics-5\.4\.0/Samples.*",
        r".*JoltPhysics-5\.4\.0/TestFramework.*",
        r".*JoltPhysics-5\.4\.0/PerformanceTest.*",
        r".*JoltPhysics-5\.4\.0/JoltViewer.*",
        r".*JoltPhysics-5\.4\.0/HelloWorld.*",
    ]
}

/// Static excludes for the assimp/zlib import middleware under Tools.
fn tools_middleware_excludes() -> Vec<&'static str> {
    vec![
        r".*assimp-5\.4\.2/test.*",
        r".*assimp-5\.4\.2/tools.*",
        r".*assimp-5\.4\.2/port.*",
        r".*zstream_test.*",
        r".*zfstream\.cpp.*",
        r".*zip/test.*",
        r".*inflate86.*",
        r".*minizip.*",
        r".*iostream/test.*",
        r".*blast/.*",
        r".*puff/.*",
        r".*testzlib/.*",
        r".*untgz/.*",
        r".*opencv.*",
    ]
}

/// The engine core: a static library with the physics, UI, and tools
/// trees compiled in.
pub fn engine() -> Result<ProjectDescriptor> {
    ProjectDescriptor::builder("Zenith", "{root}/Zenith")
        .additional_source_root("{root}/Middleware/JoltPhysics-5.4.0")
        .additional_source_root("{root}/Middleware/imgui-docking")
        .additional_source_root("{root}/Tools")
        .static_excludes([
            r".*VulkanSDK.*",
            r".*FluxCompiler.*",
            r".*glm-master.*",
        ])
        .static_excludes(jolt_excludes())
        .static_excludes([
            r".*imgui-docking/examples.*",
            r".*imgui-docking/backends/imgui_impl_sdl.*",
            r".*imgui-docking/backends/imgui_impl_opengl.*",
            r".*imgui-docking/backends/imgui_impl_dx.*",
            r".*imgui-docking/backends/imgui_impl_glut.*",
            r".*imgui-docking/backends/imgui_impl_wgpu.*",
            r".*imgui-docking/backends/imgui_impl_allegro.*",
            r".*imgui-docking/misc.*",
            r".*cmake.*",
        ])
        .static_excludes(tools_middleware_excludes())
        .rules(fragments::library_output())
        .rules(
            RuleSet::new()
                .rule(
                    Condition::always(),
                    Patch::new()
                        .precompiled_header("Zenith.h", "Zenith.cpp")
                        .precomp_exclude("{root}/Middleware/JoltPhysics-5.4.0")
                        .precomp_exclude("{root}/Middleware/imgui-docking")
                        .include_path("{root}/Middleware/vma")
                        .include_path("{root}/Middleware/JoltPhysics-5.4.0")
                        .include_path("{root}/Zenith/Vulkan")
                        .include_path("{root}/Middleware/imgui-docking")
                        .project_path("{root}/Build"),
                )
                .rule(
                    Condition::platform(Platform::Win64),
                    // Callstack capture and process memory queries.
                    Patch::new()
                        .library_file("dbghelp.lib")
                        .library_file("psapi.lib"),
                )
                .rule(
                    Condition::platform(Platform::Android),
                    Patch::new()
                        .exclude(r".*imgui-docking/backends/imgui_impl_android.*")
                        .exclude(r".*/Editor/.*"),
                ),
        )
        .build()
}

/// A game project: an executable (shared library on Android) rooted at
/// `Games/<name>` with a public dependency on the engine.
pub fn game(name: &str) -> Result<ProjectDescriptor> {
    ProjectDescriptor::builder(name, "{root}/Games/{project}")
        .rules(fragments::game_output())
        .rules(
            RuleSet::new()
                .rule(
                    Condition::always(),
                    Patch::new()
                        .include_path("{root}/Games/{project}")
                        .include_path("{root}/Games")
                        .define_value("ZENITH_ROOT", "\"{root}/\"")
                        .define_value("GAME_ASSETS_DIR", "\"{root}/Games/{project}/Assets/\"")
                        .dependency(DependencyRef::public("Zenith"))
                        .project_path("{root}/Games/{project}/Build"),
                )
                .rule(
                    Condition::tools(true).with_platform(Platform::Win64),
                    Patch::new().define("ZENITH_TOOLS"),
                ),
        )
        .build()
}

/// The Windows-only tools library for asset import/export.
pub fn tools() -> Result<ProjectDescriptor> {
    ProjectDescriptor::builder("ZenithTools", "{root}/Tools")
        .additional_source_root("{root}/Zenith/Flux/MeshGeometry")
        .platforms([Platform::Win64])
        .static_excludes(tools_middleware_excludes())
        .static_excludes([
            r".*VulkanSDK.*",
            r".*FluxCompiler.*",
            r".*glm-master.*",
            r".*cmake.*",
        ])
        .static_excludes(jolt_excludes())
        .rules(
            RuleSet::new().rule(
                Condition::always(),
                Patch::new()
                    .output(OutputType::StaticLibrary)
                    .define("ZENITH_TOOLS")
                    .define("OPENDDLPARSER_BUILD")
                    .define_value("GAME_ASSETS_DIR", "\"./Assets/\"")
                    .include_path("{root}/Tools/Middleware")
                    .include_path("{root}/Tools/Middleware/assimp/include")
                    .include_path("{root}/Tools/Middleware/opencv/build/include")
                    .include_path("{root}/Tools/Middleware/opencv/build/include/opencv2")
                    .library_path("{root}/Tools/Middleware/opencv/build/x64/vc16/lib")
                    .library_path("{root}/Tools/Middleware/assimp/lib"),
            ),
        )
        .build()
}

/// The Windows-only shader compiler executable.
pub fn flux_compiler() -> Result<ProjectDescriptor> {
    ProjectDescriptor::builder("FluxCompiler", "{root}/Zenith/FluxCompiler")
        .platforms([Platform::Win64])
        .rules(RuleSet::new().rule(
            Condition::always(),
            Patch::new()
                .output(OutputType::Executable)
                .include_path("{root}/Zenith/FluxCompiler"),
        ))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mason_config::{fragments, ResolveContext};
    use mason_targets::{AndroidAbi, Optimization, Target, ToolingProfile};

    fn target(platform: Platform, optimization: Optimization, tools: bool) -> Target {
        Target {
            platform,
            tooling: ToolingProfile::Vs2022,
            optimization,
            tools_enabled: tools,
            abi: (platform == Platform::Android).then_some(AndroidAbi::Arm64V8a),
        }
    }

    #[test]
    fn engine_resolves_to_static_library() {
        let descriptor = engine().unwrap();
        let conf = descriptor
            .resolve(
                &fragments::standard(),
                &target(Platform::Win64, Optimization::Debug, false),
                &ResolveContext::new("/work/zenith"),
            )
            .unwrap();
        assert_eq!(conf.output, Some(OutputType::StaticLibrary));
        assert!(conf.has_define("ZENITH_WINDOWS"));
        assert!(conf.has_define("ZENITH_DEBUG"));
        assert_eq!(
            conf.precompiled_header.as_ref().unwrap().header,
            "Zenith.h"
        );
        assert!(conf.library_files.contains(&"dbghelp.lib".to_string()));
    }

    #[test]
    fn engine_tools_build_keeps_tools_pch_exclusion() {
        // The tools fragment runs in the engine-wide layer, before the
        // descriptor sets the precompiled header; its exclusion must
        // still land on the header.
        let descriptor = engine().unwrap();
        let conf = descriptor
            .resolve(
                &fragments::standard(),
                &target(Platform::Win64, Optimization::Debug, true),
                &ResolveContext::new("/work/zenith"),
            )
            .unwrap();
        let pch = conf.precompiled_header.unwrap();
        assert!(pch
            .exclude_folders
            .contains(&"/work/zenith/Tools".into()));
        assert!(pch
            .exclude_folders
            .contains(&"/work/zenith/Middleware/imgui-docking".into()));
    }

    #[test]
    fn game_depends_publicly_on_engine() {
        let descriptor = game("Sokoban").unwrap();
        let conf = descriptor
            .resolve(
                &fragments::standard(),
                &target(Platform::Win64, Optimization::Release, false),
                &ResolveContext::new("/work/zenith"),
            )
            .unwrap();
        assert_eq!(conf.output, Some(OutputType::Executable));
        assert_eq!(conf.dependencies, vec![DependencyRef::public("Zenith")]);
        assert_eq!(
            conf.define_value("GAME_ASSETS_DIR"),
            Some("\"/work/zenith/Games/Sokoban/Assets/\"")
        );
    }

    #[test]
    fn game_is_shared_library_on_android() {
        let descriptor = game("Marble").unwrap();
        let conf = descriptor
            .resolve(
                &fragments::standard(),
                &target(Platform::Android, Optimization::Release, false),
                &ResolveContext::new("/work/zenith"),
            )
            .unwrap();
        assert_eq!(conf.output, Some(OutputType::SharedLibrary));
        assert!(conf.has_define("ZENITH_ANDROID"));
    }

    #[test]
    fn tools_and_flux_are_desktop_only() {
        let android = target(Platform::Android, Optimization::Debug, false);
        assert!(!tools().unwrap().is_legal_for(&android));
        assert!(!flux_compiler().unwrap().is_legal_for(&android));
        let win = target(Platform::Win64, Optimization::Debug, false);
        assert!(tools().unwrap().is_legal_for(&win));
        assert!(flux_compiler().unwrap().is_legal_for(&win));
    }
}
