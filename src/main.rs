use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResolution};
use disasteroids::config::GameConfig;
use disasteroids::constants::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use disasteroids::{config, graphics, menu, player, rendering, simulation};

/// Resize the window to the loaded playfield so one world unit stays one
/// pixel.
fn fit_window_to_viewport(
    config: Res<GameConfig>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    for mut window in windows.iter_mut() {
        window
            .resolution
            .set(config.viewport_width, config.viewport_height);
    }
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Disasteroids".into(),
            resolution: WindowResolution::new(VIEWPORT_WIDTH as u32, VIEWPORT_HEIGHT as u32),
            resizable: false,
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::BLACK))
    .init_resource::<graphics::GameFont>()
    // SimulationPlugin owns the config, input, audio and high-score resources;
    // MenuPlugin reads them, so it goes second.
    .add_plugins(simulation::SimulationPlugin)
    .add_plugins(menu::MenuPlugin)
    .add_systems(
        Startup,
        (
            graphics::load_game_font,
            graphics::setup_camera,
            fit_window_to_viewport.after(config::load_game_config),
            rendering::setup_hud
                .after(config::load_game_config)
                .after(graphics::load_game_font),
            rendering::setup_flash_overlay,
        ),
    )
    .add_systems(
        Update,
        (
            rendering::hud_display_system,
            rendering::flash_overlay_system,
            rendering::camera_shake_system,
            rendering::world_gizmo_system,
            player::player_gizmo_system,
        )
            .after(menu::game_flow_system),
    );

    app.run();
}
