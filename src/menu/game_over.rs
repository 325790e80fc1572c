use super::*;

/// Spawn the game-over overlay centred over the wreckage.
pub(super) fn setup_game_over(mut commands: Commands, font: Res<GameFont>, sim: Res<Simulation>) {
    let font = &font.0;
    commands
        .spawn((overlay_node(0.82), ZIndex(300), GameOverRoot))
        .with_children(|overlay| {
            overlay
                .spawn(card_node(Color::srgb(0.55, 0.10, 0.10)))
                .with_children(|card| {
                    label(card, font, "GAME OVER", 46.0, Color::srgb(1.0, 0.22, 0.22));
                    spacer(card, 4.0);
                    label(
                        card,
                        font,
                        format!("Final score {}   ·   reached level {}", sim.score(), sim.level()),
                        16.0,
                        subtitle_color(),
                    );
                    spacer(card, 8.0);
                    label(card, font, "Play again?", 20.0, row_text());
                    key_row(card, font, "Y", "Restart", KeyStyle::Go);
                    key_row(card, font, "N", "Quit", KeyStyle::Stop);
                    key_row(card, font, "H", "High scores", KeyStyle::Go);
                });
        });
}
