use super::*;

const NAME_CURSOR: char = '_';

// ── Name entry ────────────────────────────────────────────────────────────────

/// Spawn the "new high score" prompt.
pub(super) fn setup_high_score_entry(
    mut commands: Commands,
    font: Res<GameFont>,
    sim: Res<Simulation>,
    scores: Res<HighScoreBoard>,
) {
    let font = &font.0;
    let rank = scores.rank(sim.score());
    commands
        .spawn((overlay_node(0.82), ZIndex(300), HighScoreEntryRoot))
        .with_children(|overlay| {
            overlay
                .spawn(card_node(key_border()))
                .with_children(|card| {
                    label(card, font, "NEW HIGH SCORE!", 42.0, title_color());
                    label(
                        card,
                        font,
                        format!("{} points  ·  rank #{}", sim.score(), rank),
                        18.0,
                        row_highlight(),
                    );
                    spacer(card, 8.0);
                    label(card, font, "Enter your name:", 18.0, subtitle_color());
                    card.spawn((
                        Text::new(NAME_CURSOR.to_string()),
                        TextFont {
                            font: font.clone(),
                            font_size: 32.0,
                            ..default()
                        },
                        TextColor(row_text()),
                        HighScoreNameText,
                    ));
                    spacer(card, 8.0);
                    label(
                        card,
                        font,
                        "A–Z 0–9 Space  ·  Backspace erase  ·  Enter submit",
                        12.0,
                        hint_color(),
                    );
                });
        });
}

/// Echo the typed name with a trailing cursor while there is room.
pub(super) fn name_entry_text_system(
    flow: Res<GameFlow>,
    mut query: Query<&mut Text, With<HighScoreNameText>>,
) {
    if !flow.is_changed() {
        return;
    }
    let mut shown = flow.name_input().to_string();
    if shown.chars().count() < MAX_NAME_LENGTH {
        shown.push(NAME_CURSOR);
    }
    for mut text in query.iter_mut() {
        if text.0 != shown {
            text.0.clone_from(&shown);
        }
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// Spawn the top-ten table.  The row for the score just submitted is
/// highlighted.
pub(super) fn setup_high_score_display(
    mut commands: Commands,
    font: Res<GameFont>,
    scores: Res<HighScoreBoard>,
    flow: Res<GameFlow>,
) {
    let font = &font.0;
    let highlight = flow.last_rank();
    commands
        .spawn((overlay_node(1.0), HighScoreDisplayRoot))
        .with_children(|root| {
            label(root, font, "HIGH SCORES", 48.0, title_color());
            spacer(root, 24.0);
            root.spawn(Node {
                display: Display::Grid,
                grid_template_columns: vec![
                    GridTrack::px(48.0),
                    GridTrack::px(200.0),
                    GridTrack::px(120.0),
                    GridTrack::px(80.0),
                ],
                row_gap: Val::Px(6.0),
                ..default()
            })
            .with_children(|grid| {
                for heading in ["#", "NAME", "SCORE", "LEVEL"] {
                    label(grid, font, heading, 16.0, subtitle_color());
                }
                for (i, entry) in scores.list().iter().enumerate() {
                    let rank = i + 1;
                    let color = if highlight == Some(rank) {
                        row_highlight()
                    } else {
                        row_text()
                    };
                    label(grid, font, format!("{rank}."), 18.0, color);
                    label(grid, font, entry.name.clone(), 18.0, color);
                    label(grid, font, entry.score.to_string(), 18.0, color);
                    label(grid, font, entry.level.to_string(), 18.0, color);
                }
            });
            spacer(root, 32.0);
            key_row(root, font, "Enter", "Main menu", KeyStyle::Go);
        });
}
