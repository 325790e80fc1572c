use super::*;

/// Spawn the pause overlay over the frozen world.
///
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │ ░░░░░░░░░ semi-transparent overlay ░░░░░░░░ │
/// │ ░░░░░   ┌───────────────────────┐   ░░░░░░ │
/// │ ░░░░░   │        PAUSED         │   ░░░░░░ │
/// │ ░░░░░   │  Score 1230  Level 2  │   ░░░░░░ │
/// │ ░░░░░   │    [P]  Resume        │   ░░░░░░ │
/// │ ░░░░░   │  [Esc]  Quit          │   ░░░░░░ │
/// │ ░░░░░   └───────────────────────┘   ░░░░░░ │
/// └─────────────────────────────────────────────┘
/// ```
pub(super) fn setup_pause_menu(
    mut commands: Commands,
    font: Res<GameFont>,
    sim: Res<Simulation>,
) {
    let font = &font.0;
    commands
        .spawn((overlay_node(0.70), ZIndex(200), PauseMenuRoot))
        .with_children(|overlay| {
            overlay
                .spawn(card_node(card_border()))
                .with_children(|card| {
                    label(card, font, "PAUSED", 38.0, title_color());
                    label(
                        card,
                        font,
                        format!("Score {}   Level {}", sim.score(), sim.level()),
                        16.0,
                        subtitle_color(),
                    );
                    spacer(card, 4.0);
                    key_row(card, font, "P", "Resume", KeyStyle::Go);
                    key_row(card, font, "Esc", "Quit", KeyStyle::Stop);
                });
        });
}
