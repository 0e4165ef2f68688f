//! Textures, proxies, and the services that create them.

mod provider;
mod proxy;
mod scratch;
mod texture;

pub use provider::ResourceProvider;
pub use proxy::{LazyInstantiateCallback, TextureProxy, Volatile};
pub use scratch::ScratchResourceManager;
pub use texture::{Texture, TextureId};
