use bevy::prelude::*;

pub(super) fn title_color() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
pub(super) fn subtitle_color() -> Color {
    Color::srgb(0.55, 0.55, 0.65)
}
pub(super) fn hint_color() -> Color {
    Color::srgb(0.28, 0.28, 0.35)
}
pub(super) fn key_bg() -> Color {
    Color::srgb(0.08, 0.36, 0.14)
}
pub(super) fn key_border() -> Color {
    Color::srgb(0.18, 0.72, 0.28)
}
pub(super) fn key_text() -> Color {
    Color::srgb(0.75, 1.0, 0.80)
}
pub(super) fn quit_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
pub(super) fn quit_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
pub(super) fn quit_text() -> Color {
    Color::srgb(1.0, 0.65, 0.65)
}
pub(super) fn card_bg() -> Color {
    Color::srgb(0.04, 0.04, 0.07)
}
pub(super) fn card_border() -> Color {
    Color::srgb(0.30, 0.30, 0.46)
}
pub(super) fn row_text() -> Color {
    Color::srgb(0.90, 0.90, 1.0)
}
pub(super) fn row_highlight() -> Color {
    Color::srgb(1.0, 0.85, 0.30)
}

/// How a key badge is tinted.
#[derive(Clone, Copy)]
pub(super) enum KeyStyle {
    Go,
    Stop,
}

impl KeyStyle {
    fn colors(self) -> (Color, Color, Color) {
        match self {
            KeyStyle::Go => (key_bg(), key_border(), key_text()),
            KeyStyle::Stop => (quit_bg(), quit_border(), quit_text()),
        }
    }
}

pub(super) fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

/// Full-screen absolute node; `alpha` dims the world behind it.
pub(super) fn overlay_node(alpha: f32) -> (Node, BackgroundColor) {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            flex_direction: FlexDirection::Column,
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, alpha)),
    )
}

/// Bordered column that holds an overlay's content.
pub(super) fn card_node(border: Color) -> (Node, BackgroundColor, BorderColor) {
    (
        Node {
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            padding: UiRect::all(Val::Px(36.0)),
            row_gap: Val::Px(12.0),
            border: UiRect::all(Val::Px(2.0)),
            min_width: Val::Px(320.0),
            ..default()
        },
        BackgroundColor(card_bg()),
        BorderColor::all(border),
    )
}

pub(super) fn label(
    parent: &mut ChildSpawnerCommands<'_>,
    font: &Handle<Font>,
    text: impl Into<String>,
    size: f32,
    color: Color,
) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font: font.clone(),
            font_size: size,
            ..default()
        },
        TextColor(color),
    ));
}

/// `[K]  description` row.
pub(super) fn key_row(
    parent: &mut ChildSpawnerCommands<'_>,
    font: &Handle<Font>,
    key: &str,
    description: &str,
    style: KeyStyle,
) {
    let (bg, border, text) = style.colors();
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            column_gap: Val::Px(14.0),
            width: Val::Px(260.0),
            ..default()
        })
        .with_children(|row| {
            row.spawn((
                Node {
                    min_width: Val::Px(64.0),
                    height: Val::Px(36.0),
                    padding: UiRect::horizontal(Val::Px(8.0)),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(bg),
                BorderColor::all(border),
            ))
            .with_children(|badge| {
                label(badge, font, key, 16.0, text);
            });
            label(row, font, description, 18.0, text);
        });
}

/// Despawn every entity carrying marker `M`.
pub(super) fn despawn_all<M: Component>(mut commands: Commands, query: Query<Entity, With<M>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
