//! Texture proxies.
//!
//! A [`TextureProxy`] stands in for a texture that may not exist yet. Tasks
//! are built against proxies while recording and the proxies are turned into
//! live [`Texture`]s when the graph prepares its resources.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::GraphicsError;
use crate::resources::{ResourceProvider, Texture};
use crate::types::{Extent2d, TextureInfo};

/// Callback producing the texture of a lazy proxy.
pub type LazyInstantiateCallback =
    Box<dyn Fn(&dyn ResourceProvider) -> Option<Arc<Texture>> + Send + Sync>;

/// Whether a lazy proxy drops its texture after each use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Volatile {
    /// The texture stays attached once instantiated.
    #[default]
    No,
    /// The texture may be detached with [`TextureProxy::deinstantiate`].
    Yes,
}

/// A possibly not-yet-instantiated texture.
pub struct TextureProxy {
    dimensions: Extent2d,
    info: TextureInfo,
    label: Option<String>,
    volatile: Volatile,
    lazy_callback: Option<LazyInstantiateCallback>,
    texture: Mutex<Option<Arc<Texture>>>,
}

impl TextureProxy {
    /// Create a proxy that the resource provider instantiates on demand.
    pub fn new(dimensions: Extent2d, info: TextureInfo) -> Self {
        Self {
            dimensions,
            info,
            label: None,
            volatile: Volatile::No,
            lazy_callback: None,
            texture: Mutex::new(None),
        }
    }

    /// Create an already-instantiated proxy around an existing texture.
    pub fn wrap(texture: Arc<Texture>) -> Self {
        Self {
            dimensions: texture.dimensions(),
            info: *texture.info(),
            label: texture.label().map(str::to_owned),
            volatile: Volatile::No,
            lazy_callback: None,
            texture: Mutex::new(Some(texture)),
        }
    }

    /// Create a proxy whose texture is supplied by `callback`.
    ///
    /// Lazy proxies are skipped by [`instantiate_if_not_lazy`](Self::instantiate_if_not_lazy);
    /// whoever owns the callback decides when it runs.
    pub fn new_lazy(
        dimensions: Extent2d,
        info: TextureInfo,
        volatile: Volatile,
        callback: LazyInstantiateCallback,
    ) -> Self {
        Self {
            dimensions,
            info,
            label: None,
            volatile,
            lazy_callback: Some(callback),
            texture: Mutex::new(None),
        }
    }

    /// Set the debug label passed to the provider when instantiating.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Instantiate the proxy. Does nothing if it already has a texture.
    pub fn instantiate(&self, provider: &dyn ResourceProvider) -> Result<(), GraphicsError> {
        if self.is_lazy() {
            return self.lazy_instantiate(provider);
        }

        let mut slot = self.texture.lock();
        if slot.is_some() {
            return Ok(());
        }

        let texture = provider.create_texture(self.dimensions, &self.info, self.label())?;
        debug_assert_eq!(texture.dimensions(), self.dimensions);
        log::trace!(
            "Instantiated texture proxy {:?} ({})",
            self.label,
            self.dimensions
        );
        *slot = Some(texture);
        Ok(())
    }

    /// Run the lazy callback. Does nothing if the proxy already has a texture.
    ///
    /// # Panics
    ///
    /// Panics if the proxy is not lazy.
    pub fn lazy_instantiate(&self, provider: &dyn ResourceProvider) -> Result<(), GraphicsError> {
        let Some(callback) = &self.lazy_callback else {
            panic!("lazy_instantiate called on a non-lazy texture proxy");
        };

        let mut slot = self.texture.lock();
        if slot.is_some() {
            return Ok(());
        }

        let texture = callback(provider).ok_or_else(|| {
            GraphicsError::ResourceCreationFailed(format!(
                "lazy texture proxy callback returned no texture ({})",
                self.dimensions
            ))
        })?;
        *slot = Some(texture);
        Ok(())
    }

    /// Instantiate the proxy unless it is lazy.
    ///
    /// Lazy proxies and proxies that already have a texture succeed without
    /// touching the provider.
    pub fn instantiate_if_not_lazy(
        &self,
        provider: &dyn ResourceProvider,
    ) -> Result<(), GraphicsError> {
        if self.is_lazy() {
            return Ok(());
        }
        self.instantiate(provider)
    }

    /// Detach the texture from a volatile proxy.
    ///
    /// # Panics
    ///
    /// Panics if the proxy is not volatile.
    pub fn deinstantiate(&self) {
        assert!(
            self.is_volatile(),
            "Only volatile texture proxies can be deinstantiated"
        );
        self.texture.lock().take();
    }

    /// Check if the proxy is instantiated by a callback.
    pub fn is_lazy(&self) -> bool {
        self.lazy_callback.is_some()
    }

    /// Check if the proxy is volatile.
    pub fn is_volatile(&self) -> bool {
        self.volatile == Volatile::Yes
    }

    /// Check if the proxy has a texture.
    pub fn is_instantiated(&self) -> bool {
        self.texture.lock().is_some()
    }

    /// Get the live texture, if instantiated.
    pub fn texture(&self) -> Option<Arc<Texture>> {
        self.texture.lock().clone()
    }

    /// Get the proxy dimensions.
    pub fn dimensions(&self) -> Extent2d {
        self.dimensions
    }

    /// Get the sample count.
    pub fn sample_count(&self) -> u32 {
        self.info.sample_count
    }

    /// Get the texture shape.
    pub fn info(&self) -> &TextureInfo {
        &self.info
    }

    /// Get the label, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl std::fmt::Debug for TextureProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureProxy")
            .field("dimensions", &self.dimensions)
            .field("info", &self.info)
            .field("label", &self.label)
            .field("lazy", &self.is_lazy())
            .field("volatile", &self.volatile)
            .field("instantiated", &self.is_instantiated())
            .finish()
    }
}

static_assertions::assert_impl_all!(TextureProxy: Send, Sync);
