pub mod booking;
pub mod landing;

use fluffy_kernel::ModuleRegistry;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) -> anyhow::Result<()> {
    registry.register(landing::create_module())?;
    registry.register(booking::create_module())?;
    Ok(())
}
