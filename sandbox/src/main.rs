// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Aion Sandbox
// Drives the lifetime manager through typical application phases:
// initialization, a level load, a shader hot-reload, and shutdown.

use aion_core::Handle;
use aion_data::LifetimeManager;
use anyhow::Result;
use log::info;

/// Stand-in for a native GPU texture owned by the driver.
struct GpuTexture {
    label: &'static str,
    bytes: usize,
}

impl Drop for GpuTexture {
    fn drop(&mut self) {
        info!("Releasing texture '{}' ({} bytes).", self.label, self.bytes);
    }
}

/// Stand-in for a compiled shader module.
struct ShaderModule {
    label: &'static str,
}

impl Drop for ShaderModule {
    fn drop(&mut self) {
        info!("Releasing shader module '{}'.", self.label);
    }
}

fn load_level(lifetimes: &mut LifetimeManager) -> Result<Vec<Handle<GpuTexture>>> {
    lifetimes.push_frame("Level1");
    let mut textures = Vec::new();
    for (label, bytes) in [("terrain", 4 << 20), ("skybox", 16 << 20), ("props", 8 << 20)] {
        textures.push(lifetimes.add(GpuTexture { label, bytes })?);
    }
    Ok(textures)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut lifetimes = LifetimeManager::new();

    // Phase 1: engine-lifetime resources.
    lifetimes.push_frame("Initialization");
    let white = lifetimes.add(GpuTexture {
        label: "white-1x1",
        bytes: 4,
    })?;
    let default_shader = lifetimes.add(ShaderModule { label: "default" })?;

    // Phase 2: a level and a hot-reload scope nested inside it.
    let level_textures = load_level(&mut lifetimes)?;

    lifetimes.push_frame("ShaderReload");
    let reloaded = lifetimes.add(ShaderModule { label: "default@v2" })?;
    info!(
        "Hot-reload active: {} resources alive across {} frames.",
        lifetimes.resource_count(),
        lifetimes.frame_depth()
    );
    assert!(lifetimes.is_valid(reloaded));
    let _ = lifetimes.pop_frame();
    assert!(
        !lifetimes.is_valid(reloaded),
        "the reload scope's shader must die with its frame"
    );

    // Init- and level-scoped resources are untouched by the reload pop.
    info!(
        "Fallback texture still resolves: '{}'.",
        lifetimes.get(white)?.label
    );
    for handle in &level_textures {
        info!("Level texture alive: '{}'.", lifetimes.get(*handle)?.label);
    }
    let _ = lifetimes.get(default_shader)?;

    // Phase 3: unload the level, then tear everything down.
    let _ = lifetimes.pop_frame();
    info!(
        "Level unloaded; {} resource(s) remain.",
        lifetimes.resource_count()
    );

    lifetimes.shutdown();
    Ok(())
}
