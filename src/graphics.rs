use crate::rigid_body::Viewport;
use bevy::prelude::*;
use std::path::Path;

const GAME_FONT_PATH: &str = "fonts/game.ttf";

/// Game font resource.
///
/// All UI text references `font.0.clone()`.  The default handle resolves to
/// Bevy's built-in font, which is what the game uses when no font file ships
/// under `assets/`.
#[derive(Resource, Default)]
pub struct GameFont(pub Handle<Font>);

/// Load `assets/fonts/game.ttf` if present.
///
/// Must run before any UI setup systems that spawn text.
pub fn load_game_font(mut font: ResMut<GameFont>, asset_server: Res<AssetServer>) {
    if Path::new("assets").join(GAME_FONT_PATH).exists() {
        font.0 = asset_server.load(GAME_FONT_PATH);
        info!("Game font loaded from {GAME_FONT_PATH}");
    } else {
        debug!("No {GAME_FONT_PATH}; using the built-in font");
    }
}

/// Marker for the single gameplay camera.
#[derive(Component)]
pub struct MainCamera;

/// Setup camera for 2D rendering.  The default projection maps one world
/// unit to one pixel, so the window size is the playfield size.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
    info!("Camera spawned");
}

/// Map a simulation position (origin top-left, +Y down) to Bevy world space
/// (origin at the window centre, +Y up).
#[inline]
pub fn to_world(viewport: Viewport, position: Vec2) -> Vec2 {
    Vec2::new(
        position.x - viewport.width * 0.5,
        viewport.height * 0.5 - position.y,
    )
}
