//=========================================================================
// Resource Service
//=========================================================================
//
// Typed resource table with string-keyed global entries.
//
// Architecture:
//   create::<T>(path, args) → Ruid ──→ HashMap<Ruid, Box<dyn Any>>
//                               │
//   register_global(name, id) ──┴──→ HashMap<String, Ruid>
//
// Scenes look shared resources up by name ("Font32", "ClickSound")
// instead of holding identifiers handed to them at wiring time.
//
// Decoding (glyph rasterization, PCM decoding) happens in the backends;
// a resource here is the validated description the backend consumes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::subsystem::{Subsystem, SubsystemError};

//=== Errors ==============================================================

/// Resource creation and lookup failures.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The construction arguments do not describe a usable resource.
    #[error("invalid resource `{path}`: {reason}")]
    InvalidArguments { path: PathBuf, reason: String },

    /// Resources can only be created while the service is running.
    #[error("resource service is not running")]
    NotRunning,
}

//=== Ruid ================================================================

/// Resource identifier, unique for the lifetime of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ruid(u64);

impl fmt::Display for Ruid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== Resource Trait ======================================================

/// A loadable resource type.
pub trait Resource: Any + Sized {
    /// Construction arguments beyond the path.
    type Args;

    /// Builds the resource description, validating `args`.
    fn load(path: &Path, args: Self::Args) -> Result<Self, ResourceError>;
}

//=== TtFont ==============================================================

/// TrueType font at a fixed pixel size over a contiguous glyph range.
#[derive(Debug, Clone, PartialEq)]
pub struct TtFont {
    path: PathBuf,
    begin: u32,
    end: u32,
    size: f32,
}

/// Construction arguments for [`TtFont`].
#[derive(Debug, Clone, Copy)]
pub struct FontArgs {
    /// First code point rasterized.
    pub begin: u32,
    /// Last code point rasterized (inclusive).
    pub end: u32,
    /// Pixel height.
    pub size: f32,
}

impl TtFont {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn glyph_range(&self) -> (u32, u32) {
        (self.begin, self.end)
    }

    /// Returns `true` if every character of `text` is in the glyph range.
    pub fn covers(&self, text: &str) -> bool {
        text.chars()
            .all(|c| (self.begin..=self.end).contains(&(c as u32)))
    }
}

impl Resource for TtFont {
    type Args = FontArgs;

    fn load(path: &Path, args: FontArgs) -> Result<Self, ResourceError> {
        let invalid = |reason: String| ResourceError::InvalidArguments {
            path: path.to_path_buf(),
            reason,
        };

        if args.begin > args.end {
            return Err(invalid(format!(
                "empty glyph range {:#x}..={:#x}",
                args.begin, args.end
            )));
        }
        if !(args.size.is_finite() && args.size > 0.0) {
            return Err(invalid(format!("font size must be positive, got {}", args.size)));
        }

        Ok(Self {
            path: path.to_path_buf(),
            begin: args.begin,
            end: args.end,
            size: args.size,
        })
    }
}

//=== Sound ===============================================================

/// Short sound effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    path: PathBuf,
}

impl Sound {
    const SUPPORTED: [&'static str; 3] = ["wav", "ogg", "mp3"];

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Resource for Sound {
    type Args = ();

    fn load(path: &Path, _args: ()) -> Result<Self, ResourceError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension {
            Some(ext) if Self::SUPPORTED.contains(&ext.as_str()) => Ok(Self {
                path: path.to_path_buf(),
            }),
            _ => Err(ResourceError::InvalidArguments {
                path: path.to_path_buf(),
                reason: format!("unsupported sound format (expected one of {:?})", Self::SUPPORTED),
            }),
        }
    }
}

//=== ResourceService =====================================================

/// Owns every loaded resource and the global name table.
pub struct ResourceService {
    resources: HashMap<Ruid, Box<dyn Any>>,
    globals: HashMap<String, Ruid>,
    next_id: u64,
    running: bool,
}

impl ResourceService {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            resources: HashMap::new(),
            globals: HashMap::new(),
            next_id: 1,
            running: false,
        }
    }

    //--- Creation ---------------------------------------------------------

    /// Loads a resource of type `T` and returns its identifier.
    pub fn create<T: Resource>(
        &mut self,
        path: impl AsRef<Path>,
        args: T::Args,
    ) -> Result<Ruid, ResourceError> {
        if !self.running {
            return Err(ResourceError::NotRunning);
        }

        let path = path.as_ref();
        let resource = T::load(path, args)?;

        let id = Ruid(self.next_id);
        self.next_id += 1;
        self.resources.insert(id, Box::new(resource));

        debug!("Created {} {} from {}", std::any::type_name::<T>(), id, path.display());
        Ok(id)
    }

    /// Removes a resource. Global names pointing at it are dropped as well.
    pub fn destroy(&mut self, id: Ruid) -> bool {
        let removed = self.resources.remove(&id).is_some();
        if removed {
            self.globals.retain(|_, global| *global != id);
        }
        removed
    }

    //--- Globals ----------------------------------------------------------

    /// Publishes `id` under `name`.
    pub fn register_global(&mut self, name: impl Into<String>, id: Ruid) {
        let name = name.into();
        if !self.resources.contains_key(&id) {
            warn!("Global `{}` registered for unknown resource {}", name, id);
        }
        if let Some(previous) = self.globals.insert(name.clone(), id) {
            warn!("Global `{}` replaced ({} → {})", name, previous, id);
        }
    }

    /// Identifier published under `name`.
    pub fn global(&self, name: &str) -> Option<Ruid> {
        self.globals.get(name).copied()
    }

    /// Resource published under `name`, if it has type `T`.
    pub fn global_resource<T: Resource>(&self, name: &str) -> Option<&T> {
        self.global(name).and_then(|id| self.get::<T>(id))
    }

    //--- Queries ----------------------------------------------------------

    /// Resource `id`, if it exists and has type `T`.
    pub fn get<T: Resource>(&self, id: Ruid) -> Option<&T> {
        self.resources
            .get(&id)
            .and_then(|resource| resource.downcast_ref::<T>())
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

//=== Subsystem ===========================================================

impl Subsystem for ResourceService {
    fn name(&self) -> &'static str {
        "resource"
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        self.running = true;
        Ok(())
    }

    fn shutdown(&mut self) {
        info!("Releasing {} resources", self.resources.len());
        self.globals.clear();
        self.resources.clear();
        self.running = false;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> ResourceService {
        let mut service = ResourceService::new();
        service.startup().unwrap();
        service
    }

    fn font_args(size: f32) -> FontArgs {
        FontArgs { begin: 0x00, end: 127, size }
    }

    //=====================================================================
    // Creation Tests
    //=====================================================================

    #[test]
    fn create_returns_distinct_ids() {
        let mut service = running();
        let a = service.create::<TtFont>("Font/Flappy_Font.ttf", font_args(32.0)).unwrap();
        let b = service.create::<TtFont>("Font/Flappy_Font.ttf", font_args(64.0)).unwrap();

        assert_ne!(a, b);
        assert_eq!(service.get::<TtFont>(b).map(TtFont::size), Some(64.0));
    }

    #[test]
    fn create_requires_running_service() {
        let mut service = ResourceService::new();
        let err = service.create::<Sound>("Sound/swoosh.wav", ()).unwrap_err();
        assert!(matches!(err, ResourceError::NotRunning));
    }

    #[test]
    fn invalid_font_arguments_are_rejected() {
        let mut service = running();
        assert!(service.create::<TtFont>("f.ttf", font_args(0.0)).is_err());
        assert!(service
            .create::<TtFont>("f.ttf", FontArgs { begin: 200, end: 10, size: 12.0 })
            .is_err());
        assert!(service.is_empty());
    }

    #[test]
    fn sound_format_is_checked() {
        let mut service = running();
        assert!(service.create::<Sound>("Sound/swoosh.WAV", ()).is_ok());
        assert!(service.create::<Sound>("Sound/swoosh.txt", ()).is_err());
    }

    //=====================================================================
    // Global Tests
    //=====================================================================

    #[test]
    fn globals_resolve_by_name_and_type() {
        let mut service = running();
        let click = service.create::<Sound>("Sound/swoosh.wav", ()).unwrap();
        service.register_global("ClickSound", click);

        assert_eq!(service.global("ClickSound"), Some(click));
        assert!(service.global_resource::<Sound>("ClickSound").is_some());
        assert!(
            service.global_resource::<TtFont>("ClickSound").is_none(),
            "type mismatch must not downcast"
        );
        assert_eq!(service.global("Font32"), None);
    }

    #[test]
    fn destroy_unpublishes_globals() {
        let mut service = running();
        let font = service.create::<TtFont>("f.ttf", font_args(90.0)).unwrap();
        service.register_global("Font90", font);

        assert!(service.destroy(font));
        assert_eq!(service.global("Font90"), None);
        assert!(!service.destroy(font));
    }

    #[test]
    fn shutdown_releases_everything() {
        let mut service = running();
        let font = service.create::<TtFont>("f.ttf", font_args(32.0)).unwrap();
        service.register_global("Font32", font);

        service.shutdown();

        assert!(service.is_empty());
        assert_eq!(service.global("Font32"), None);
    }

    #[test]
    fn font_covers_ascii_text() {
        let font = TtFont::load(Path::new("f.ttf"), font_args(32.0)).unwrap();
        assert!(font.covers("SCORE 42"));
        assert!(!font.covers("점수"));
    }
}
