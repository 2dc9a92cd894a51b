//! Built-in shared rule fragments.
//!
//! These are the engine-wide settings every project composes before its
//! own overlays: language standard and universal defines, platform
//! markers and search paths, the debug marker, the tools feature
//! fragment, and the platform source excludes. Authored once here and
//! referenced by descriptors via [`RuleSet::extend`] instead of being
//! copy-pasted per project.

use mason_targets::{Optimization, Platform};

use crate::configuration::OutputType;
use crate::rules::{Condition, Patch, RuleSet};

/// Language standard, universal defines, and the platform/debug marker
/// defines.
pub fn common_settings() -> RuleSet {
    RuleSet::new()
        .rule(
            Condition::always(),
            Patch::new()
                .language_standard("c++20")
                .define("GLM_ENABLE_EXPERIMENTAL")
                .define("NOMINMAX")
                .define("ZENITH_VULKAN"),
        )
        .rule(
            Condition::platform(Platform::Win64),
            Patch::new().define("ZENITH_WINDOWS"),
        )
        .rule(
            Condition::platform(Platform::Android),
            Patch::new().define("ZENITH_ANDROID"),
        )
        .rule(
            Condition::optimization(Optimization::Debug),
            Patch::new().define("ZENITH_DEBUG"),
        )
}

/// Engine and middleware header search paths.
pub fn common_include_paths() -> RuleSet {
    RuleSet::new()
        .rule(
            Condition::always(),
            Patch::new()
                .include_path("{root}/Zenith")
                .include_path("{root}/Zenith/Core")
                .include_path("{root}/Middleware/glm-master")
                .include_path("{root}/Middleware/stb")
                .include_path("{root}/Middleware"),
        )
        .rule(
            Condition::platform(Platform::Win64),
            Patch::new()
                .include_path("{root}/Middleware/glfw-3.4.bin.WIN64/include")
                .include_path("{root}/Middleware/VulkanSDK/1.3.280.0/Include")
                .include_path("{root}/Zenith/Windows"),
        )
        .rule(
            Condition::platform(Platform::Android),
            // NDK Vulkan headers come from the toolchain.
            Patch::new().include_path("{root}/Zenith/Android"),
        )
}

/// Desktop linker inputs. Android links the system Vulkan loader, so it
/// contributes nothing here.
pub fn common_library_paths() -> RuleSet {
    RuleSet::new().rule(
        Condition::platform(Platform::Win64),
        Patch::new()
            .library_path("{root}/Middleware/VulkanSDK/1.3.280.0/Lib")
            .library_path("{root}/Middleware/glfw-3.4.bin.WIN64/lib-vc2022")
            .library_file("glfw3_mt.lib")
            .library_file("vulkan-1.lib"),
    )
}

/// Per-platform source excludes: each platform hides the other
/// platform's sources, and mobile additionally hides editor/tools code.
pub fn platform_source_excludes() -> RuleSet {
    RuleSet::new()
        .rule(
            Condition::platform(Platform::Win64),
            Patch::new()
                .exclude(r".*/Android/.*")
                .exclude(r".*_Android.*"),
        )
        .rule(
            Condition::platform(Platform::Android),
            Patch::new()
                .exclude(r".*/Windows/.*")
                .exclude(r".*_Windows.*")
                .exclude(r".*/Editor/.*")
                .exclude(r".*/Tools/.*"),
        )
}

/// The tools feature fragment: extra defines, search paths, and
/// per-optimization tool libraries when enabled; tools sources excluded
/// when disabled.
pub fn tools_fragment() -> RuleSet {
    let on = Condition::tools(true).with_platform(Platform::Win64);
    RuleSet::new()
        .rule(
            on.clone(),
            Patch::new()
                .define("ZENITH_TOOLS")
                .define("OPENDDLPARSER_BUILD")
                .define_value("ZENITH_ROOT", "\"{root}/\"")
                .include_path("{root}/Tools/Middleware")
                .include_path("{root}/Tools/Middleware/assimp/include")
                .include_path("{root}/Tools/Middleware/opencv/build/include")
                .include_path("{root}/Tools/Middleware/opencv/build/include/opencv2")
                .library_path("{root}/Tools/Middleware/opencv/build/x64/vc16/lib")
                .library_path("{root}/Tools/Middleware/assimp/lib")
                .precomp_exclude("{root}/Tools"),
        )
        .rule(
            on.clone().with_optimization(Optimization::Debug),
            Patch::new()
                .library_file("opencv_world4100d.lib")
                .library_file("assimp-vc143-mtd.lib"),
        )
        .rule(
            on.with_optimization(Optimization::Release),
            Patch::new()
                .library_file("opencv_world4100.lib")
                .library_file("assimp-vc143-mt.lib"),
        )
        .rule(
            Condition::tools(false),
            Patch::new().exclude(r".*/Tools/.*"),
        )
}

/// Asset-root defines derived from the canonical root.
pub fn asset_defines() -> RuleSet {
    RuleSet::new()
        .rule(
            Condition::always(),
            Patch::new().define_value("ENGINE_ASSETS_DIR", "\"{root}/Zenith/Assets/\""),
        )
        .rule(
            Condition::platform(Platform::Win64),
            Patch::new()
                .define_value("SHADER_SOURCE_ROOT", "\"{root}/Zenith/Flux/Shaders/\""),
        )
}

/// The full engine-wide common layer, in precedence order: settings,
/// include paths, library paths, platform excludes, tools fragment,
/// asset defines.
pub fn standard() -> RuleSet {
    RuleSet::new()
        .extend(common_settings())
        .extend(common_include_paths())
        .extend(common_library_paths())
        .extend(platform_source_excludes())
        .extend(tools_fragment())
        .extend(asset_defines())
}

/// Default output-type rules for a library project: static on every
/// platform.
pub fn library_output() -> RuleSet {
    RuleSet::new().rule(
        Condition::always(),
        Patch::new().output(OutputType::StaticLibrary),
    )
}

/// Default output-type rules for a game project: executable on desktop,
/// shared library on Android.
pub fn game_output() -> RuleSet {
    RuleSet::new()
        .rule(
            Condition::platform(Platform::Win64),
            Patch::new().output(OutputType::Executable),
        )
        .rule(
            Condition::platform(Platform::Android),
            Patch::new().output(OutputType::SharedLibrary),
        )
}
