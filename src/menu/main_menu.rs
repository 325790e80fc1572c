use super::*;

/// Spawn the title screen.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │               DISASTEROIDS                  │
/// │      Clear the field. Mind the rocks.       │
/// │                                             │
/// │            [S]  Start game                  │
/// │            [H]  High scores                 │
/// │            [Q]  Quit                        │
/// │                                             │
/// │   ←/→ rotate  ↑ thrust  Space fire  V flip  │
/// └─────────────────────────────────────────────┘
/// ```
pub(super) fn setup_main_menu(
    mut commands: Commands,
    font: Res<GameFont>,
    scores: Res<HighScoreBoard>,
) {
    let font = &font.0;
    commands
        .spawn((overlay_node(1.0), MainMenuRoot))
        .with_children(|root| {
            label(root, font, "DISASTEROIDS", 56.0, title_color());
            spacer(root, 10.0);
            label(
                root,
                font,
                "Clear the field. Mind the rocks.",
                18.0,
                subtitle_color(),
            );
            spacer(root, 44.0);

            key_row(root, font, "S", "Start game", KeyStyle::Go);
            spacer(root, 10.0);
            key_row(root, font, "H", "High scores", KeyStyle::Go);
            spacer(root, 10.0);
            key_row(root, font, "Q", "Quit", KeyStyle::Stop);

            spacer(root, 36.0);
            label(
                root,
                font,
                format!("Best: {}", scores.highest()),
                16.0,
                row_highlight(),
            );
            spacer(root, 24.0);
            label(
                root,
                font,
                "←/→ rotate  ·  ↑ thrust  ·  Space fire  ·  V about-face  ·  P pause",
                12.0,
                hint_color(),
            );
        });
}
