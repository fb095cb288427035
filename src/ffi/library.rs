//! Runtime loading of the FMOD shared libraries.
//!
//! The core library is opened once per process and its exports are
//! resolved into per-class function tables. A symbol the library does not
//! export is kept as an absent entry and reported when called, so one
//! build of this crate works across library revisions that add or drop
//! functions.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use libc::c_uint;
use libloading::Library;
use parking_lot::Mutex;

use super::tables::{
    ChannelFns, ChannelGroupFns, ControlFns, DspConnectionFns, DspFns, GeometryFns, GlobalFns,
    Reverb3dFns, SoundFns, SoundGroupFns, SystemFns,
};
use super::studio_tables::{
    BankFns, BusFns, EventDescriptionFns, EventInstanceFns, StudioSystemFns, VcaFns,
};
use super::{FMOD_CHANNEL, FMOD_CHANNELGROUP, FMOD_VERSION};
use crate::error::{Error, Result};

/// Environment variable naming the core library to load.
pub const LIBRARY_PATH_ENV: &str = "FMOD_LIBRARY_PATH";
/// Environment variable naming the studio library to load.
pub const STUDIO_LIBRARY_PATH_ENV: &str = "FMOD_STUDIO_LIBRARY_PATH";
/// Environment variable overriding the header version passed to `*_Create`.
pub const HEADER_VERSION_ENV: &str = "FMOD_HEADER_VERSION";

/// A resolved native function.
///
/// `name` is the full exported symbol, used in error reports.
#[derive(Clone, Copy)]
pub struct Func<F> {
    ptr: Option<F>,
    name: &'static str,
}

impl<F: Copy> Func<F> {
    /// The function pointer, or `MissingFunction` if the library lacks it.
    pub fn get(&self) -> Result<F> {
        self.ptr.ok_or(Error::MissingFunction(self.name))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_available(&self) -> bool {
        self.ptr.is_some()
    }

    #[cfg(test)]
    pub(crate) fn absent(name: &'static str) -> Self {
        Func { ptr: None, name }
    }

    #[cfg(test)]
    pub(crate) fn from_ptr(ptr: F, name: &'static str) -> Self {
        Func {
            ptr: Some(ptr),
            name,
        }
    }
}

impl<F> std::fmt::Debug for Func<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            self.name,
            if self.ptr.is_some() { "" } else { " (missing)" }
        )
    }
}

/// Look up `prefix` + `symbol` in `lib`.
///
/// # Safety
/// `F` must be the exact function pointer type of the exported symbol.
pub(crate) unsafe fn resolve<F: Copy>(lib: &Library, prefix: &str, symbol: &str) -> Func<F> {
    // Names live as long as the process-wide tables that hold them.
    let name: &'static str = Box::leak(format!("{}{}", prefix, symbol).into_boxed_str());
    let ptr = match lib.get::<F>(name.as_bytes()) {
        Ok(sym) => Some(*sym),
        Err(_) => {
            log::trace!("{} is not exported by the loaded library", name);
            None
        }
    };
    Func { ptr, name }
}

/// Which of the two vendor libraries to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryKind {
    Core,
    Studio,
}

/// Where to find the libraries and which header version to announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub core_path: Option<PathBuf>,
    pub studio_path: Option<PathBuf>,
    pub header_version: c_uint,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            core_path: None,
            studio_path: None,
            header_version: FMOD_VERSION,
        }
    }
}

impl LibraryConfig {
    /// Defaults overridden by `FMOD_LIBRARY_PATH`, `FMOD_STUDIO_LIBRARY_PATH`
    /// and `FMOD_HEADER_VERSION`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = env::var_os(LIBRARY_PATH_ENV) {
            config.core_path = Some(PathBuf::from(path));
        }
        if let Some(path) = env::var_os(STUDIO_LIBRARY_PATH_ENV) {
            config.studio_path = Some(PathBuf::from(path));
        }
        if let Ok(version) = env::var(HEADER_VERSION_ENV) {
            match crate::config::parse_header_version(&version) {
                Ok(v) => config.header_version = v,
                Err(e) => log::warn!("ignoring {}={:?}: {:#}", HEADER_VERSION_ENV, version, e),
            }
        }
        config
    }

    fn path_for(&self, kind: LibraryKind) -> Option<&Path> {
        match kind {
            LibraryKind::Core => self.core_path.as_deref(),
            LibraryKind::Studio => self.studio_path.as_deref(),
        }
    }
}

/// Library file names tried when no explicit path is configured.
pub fn default_names(kind: LibraryKind) -> &'static [&'static str] {
    match kind {
        LibraryKind::Core => {
            if cfg!(target_os = "windows") {
                &["fmod.dll", "fmod64.dll", "fmodL.dll", "fmodL64.dll"]
            } else if cfg!(target_os = "macos") {
                &["libfmod.dylib", "libfmodL.dylib"]
            } else {
                &["libfmod.so", "libfmod.so.13", "libfmodL.so", "libfmodL.so.13"]
            }
        }
        LibraryKind::Studio => {
            if cfg!(target_os = "windows") {
                &[
                    "fmodstudio.dll",
                    "fmodstudio64.dll",
                    "fmodstudioL.dll",
                    "fmodstudioL64.dll",
                ]
            } else if cfg!(target_os = "macos") {
                &["libfmodstudio.dylib", "libfmodstudioL.dylib"]
            } else {
                &[
                    "libfmodstudio.so",
                    "libfmodstudio.so.13",
                    "libfmodstudioL.so",
                    "libfmodstudioL.so.13",
                ]
            }
        }
    }
}

/// Candidate paths for a library, explicit path first and alone.
pub fn candidate_paths(config: &LibraryConfig, kind: LibraryKind) -> Vec<PathBuf> {
    match config.path_for(kind) {
        Some(path) => vec![path.to_path_buf()],
        None => default_names(kind).iter().map(PathBuf::from).collect(),
    }
}

fn open_first(candidates: &[PathBuf]) -> Result<(Library, PathBuf)> {
    let mut last_error = None;
    for path in candidates {
        match unsafe { Library::new(path) } {
            Ok(lib) => return Ok((lib, path.clone())),
            Err(e) => {
                log::debug!("could not open {}: {}", path.display(), e);
                last_error = Some(e);
            }
        }
    }
    let paths = candidates.iter().map(|p| p.display().to_string()).collect();
    match last_error {
        Some(source) => Err(Error::Library { paths, source }),
        None => Err(Error::InvalidArgument(
            "no library candidates to load".to_string(),
        )),
    }
}

/// Function tables of the FMOD Core library.
pub struct Api {
    pub global: GlobalFns,
    pub system: SystemFns,
    pub channel_control: ControlFns<FMOD_CHANNEL>,
    pub channel: ChannelFns,
    pub group_control: ControlFns<FMOD_CHANNELGROUP>,
    pub channel_group: ChannelGroupFns,
    pub sound: SoundFns,
    pub sound_group: SoundGroupFns,
    pub dsp: DspFns,
    pub dsp_connection: DspConnectionFns,
    pub geometry: GeometryFns,
    pub reverb3d: Reverb3dFns,
    config: LibraryConfig,
    path: PathBuf,
    studio: OnceLock<StudioApi>,
    studio_init: Mutex<()>,
    _library: Library,
}

impl Api {
    fn open(config: LibraryConfig) -> Result<Self> {
        let (library, path) = open_first(&candidate_paths(&config, LibraryKind::Core))?;
        log::debug!("loaded FMOD core library from {}", path.display());

        let api = unsafe {
            Api {
                global: GlobalFns::load(&library, "FMOD_"),
                system: SystemFns::load(&library, "FMOD_System_"),
                channel_control: ControlFns::load(&library, "FMOD_Channel_"),
                channel: ChannelFns::load(&library, "FMOD_Channel_"),
                group_control: ControlFns::load(&library, "FMOD_ChannelGroup_"),
                channel_group: ChannelGroupFns::load(&library, "FMOD_ChannelGroup_"),
                sound: SoundFns::load(&library, "FMOD_Sound_"),
                sound_group: SoundGroupFns::load(&library, "FMOD_SoundGroup_"),
                dsp: DspFns::load(&library, "FMOD_DSP_"),
                dsp_connection: DspConnectionFns::load(&library, "FMOD_DSPConnection_"),
                geometry: GeometryFns::load(&library, "FMOD_Geometry_"),
                reverb3d: Reverb3dFns::load(&library, "FMOD_Reverb3D_"),
                config,
                path,
                studio: OnceLock::new(),
                studio_init: Mutex::new(()),
                _library: library,
            }
        };
        Ok(api)
    }

    /// Header version announced to `FMOD_System_Create`.
    pub fn header_version(&self) -> c_uint {
        self.config.header_version
    }

    /// Path the core library was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Studio function tables, opening the studio library on first use.
    pub fn studio(&self) -> Result<&StudioApi> {
        if let Some(studio) = self.studio.get() {
            return Ok(studio);
        }
        let _guard = self.studio_init.lock();
        if let Some(studio) = self.studio.get() {
            return Ok(studio);
        }
        let loaded = StudioApi::open(&self.config)?;
        Ok(self.studio.get_or_init(|| loaded))
    }
}

/// Function tables of the FMOD Studio library.
pub struct StudioApi {
    pub system: StudioSystemFns,
    pub bank: BankFns,
    pub event_description: EventDescriptionFns,
    pub event_instance: EventInstanceFns,
    pub bus: BusFns,
    pub vca: VcaFns,
    path: PathBuf,
    _library: Library,
}

impl StudioApi {
    fn open(config: &LibraryConfig) -> Result<Self> {
        let (library, path) = open_first(&candidate_paths(config, LibraryKind::Studio))?;
        log::debug!("loaded FMOD studio library from {}", path.display());

        let api = unsafe {
            StudioApi {
                system: StudioSystemFns::load(&library, "FMOD_Studio_System_"),
                bank: BankFns::load(&library, "FMOD_Studio_Bank_"),
                event_description: EventDescriptionFns::load(
                    &library,
                    "FMOD_Studio_EventDescription_",
                ),
                event_instance: EventInstanceFns::load(&library, "FMOD_Studio_EventInstance_"),
                bus: BusFns::load(&library, "FMOD_Studio_Bus_"),
                vca: VcaFns::load(&library, "FMOD_Studio_VCA_"),
                path,
                _library: library,
            }
        };
        Ok(api)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

static API: OnceLock<Api> = OnceLock::new();
static LOAD_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Load the core library with `config` and install it process-wide.
///
/// Once a library is installed, later calls return it regardless of
/// `config`.
pub fn load(config: LibraryConfig) -> Result<&'static Api> {
    if let Some(api) = API.get() {
        if *api.config() != config {
            log::debug!("FMOD already loaded from {}, ignoring new config", api.path().display());
        }
        return Ok(api);
    }
    let _guard = LOAD_LOCK.lock();
    if let Some(api) = API.get() {
        return Ok(api);
    }
    let api = Api::open(config)?;
    Ok(API.get_or_init(|| api))
}

/// The installed core API, loading it from the environment on first use.
pub fn api() -> Result<&'static Api> {
    match API.get() {
        Some(api) => Ok(api),
        None => load(LibraryConfig::from_env()),
    }
}

/// The studio API, loading both libraries on first use.
pub fn studio_api() -> Result<&'static StudioApi> {
    api()?.studio()
}

/// True once a core library has been installed.
pub fn is_loaded() -> bool {
    API.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_is_the_only_candidate() {
        let config = LibraryConfig {
            core_path: Some(PathBuf::from("/opt/fmod/libfmod.so")),
            ..Default::default()
        };
        assert_eq!(
            candidate_paths(&config, LibraryKind::Core),
            vec![PathBuf::from("/opt/fmod/libfmod.so")]
        );
        // The studio path falls back to defaults independently.
        assert_eq!(
            candidate_paths(&config, LibraryKind::Studio).len(),
            default_names(LibraryKind::Studio).len()
        );
    }

    #[test]
    fn test_default_names_are_distinct_per_kind() {
        for name in default_names(LibraryKind::Core) {
            assert!(!default_names(LibraryKind::Studio).contains(name));
        }
    }

    #[test]
    fn test_open_missing_library_reports_paths() {
        let candidates = vec![PathBuf::from("/nonexistent/libfmod-does-not-exist.so")];
        match open_first(&candidates) {
            Err(Error::Library { paths, .. }) => {
                assert_eq!(paths, vec!["/nonexistent/libfmod-does-not-exist.so".to_string()]);
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("library should not load"),
        }
    }

    #[test]
    fn test_missing_function_error_names_symbol() {
        let func: Func<unsafe extern "C" fn() -> i32> = Func::absent("FMOD_System_GetCPUUsage");
        assert!(!func.is_available());
        match func.get() {
            Err(Error::MissingFunction(name)) => assert_eq!(name, "FMOD_System_GetCPUUsage"),
            _ => panic!("expected MissingFunction"),
        }
        assert_eq!(format!("{:?}", func), "FMOD_System_GetCPUUsage (missing)");
    }

    #[test]
    fn test_default_config_uses_crate_header_version() {
        assert_eq!(LibraryConfig::default().header_version, FMOD_VERSION);
    }
}
