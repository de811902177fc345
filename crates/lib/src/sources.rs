//! Source lists handed to the native compile step.

use crate::platform::TargetPlatform;
use crate::resolve::MINGW_LIBS;

/// Feature modules compiled through an `include_<module>` amalgamation file.
pub const MODULES: [&str; 19] = [
  "jlv2_host",
  "juce_audio_basics",
  "juce_audio_devices",
  "juce_audio_formats",
  "juce_audio_processors",
  "juce_audio_utils",
  "juce_core",
  "juce_cryptography",
  "juce_data_structures",
  "juce_dsp",
  "juce_events",
  "juce_graphics",
  "juce_gui_basics",
  "juce_gui_extra",
  "juce_osc",
  "kv_core",
  "kv_engines",
  "kv_gui",
  "kv_models",
];

/// Modules that are plain C++ even where the rest are Objective-C++.
pub const CPP_ONLY_MODULES: [&str; 3] = ["juce_analytics", "juce_osc", "jlv2_host"];

/// Paths of the module amalgamation files under `prefix`, in module order.
///
/// An empty or absent `ext` selects `.mm` for macOS and `.cpp` elsewhere;
/// [`CPP_ONLY_MODULES`] always use `.cpp`.
pub fn list_optional_module_sources(prefix: &str, ext: Option<&str>, platform: TargetPlatform) -> Vec<String> {
  let extension = match ext.filter(|e| !e.is_empty()) {
    Some(e) => e,
    None if platform.is_mac() => ".mm",
    None => ".cpp",
  };

  MODULES
    .iter()
    .map(|module| {
      let e = if CPP_ONLY_MODULES.contains(module) { ".cpp" } else { extension };
      format!("{}/include_{}{}", prefix, module, e)
    })
    .collect()
}

/// Uppercase identifiers of the mingw system libraries, in link order.
pub fn list_platform_library_names() -> Vec<String> {
  MINGW_LIBS.iter().map(|l| l.to_uppercase()).collect()
}
