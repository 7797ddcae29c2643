use strum_macros::{AsRefStr, EnumIter};

/// Folder under `assets/` the textures live in
pub const TEXTURE_DIR: &str = "textures";

/// Every surface texture the scene uses.
/// Each variant becomes exactly one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum BodyTexture {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Moon,
    Stars,
}

impl BodyTexture {
    /// The file name inside [TEXTURE_DIR]
    pub fn file_name(&self) -> &'static str {
        match self {
            BodyTexture::Sun => "2k_sun.jpg",
            BodyTexture::Mercury => "2k_mercury.jpg",
            BodyTexture::Venus => "8k_venus_surface.jpg",
            BodyTexture::Earth => "8k_earth_daymap.jpg",
            BodyTexture::Mars => "8k_mars.jpg",
            BodyTexture::Moon => "8k_moon.jpg",
            BodyTexture::Stars => "8k_stars_milky_way.jpg",
        }
    }

    /// The path handed to the asset server
    pub fn asset_path(&self) -> String {
        format!("{}/{}", TEXTURE_DIR, self.file_name())
    }

    /// Emissive textures ignore scene lighting
    pub fn is_unlit(&self) -> bool {
        matches!(self, BodyTexture::Sun | BodyTexture::Stars)
    }
}
