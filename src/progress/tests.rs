//! Tests for the progress component.

use super::*;
use crate::color::Rgba;
use crate::error::ColorError;
use crate::font::Font;
use crate::geometry::Rect;
use crate::popup::model::FrameKind;
use crate::popup::FrameMsg;
use bubbletea_rs::Msg;
use lipgloss_extras::lipgloss;
use proptest::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn red() -> Rgba {
    Rgba::from_rgb8(255, 0, 0)
}

fn green() -> Rgba {
    Rgba::from_rgb8(0, 255, 0)
}

fn blue() -> Rgba {
    Rgba::from_rgb8(0, 0, 255)
}

fn update_frame(m: &Model) -> Msg {
    Box::new(FrameMsg {
        id: m.bubble.id(),
        kind: FrameKind::Update,
        tag: m.bubble.update_tag,
    })
}

fn fade_frame(m: &Model) -> Msg {
    Box::new(FrameMsg {
        id: m.bubble.id(),
        kind: FrameKind::Fade,
        tag: m.bubble.fade_tag,
    })
}

fn finish_update(m: &mut Model) {
    let mut frames = 0;
    while m.update(update_frame(m)).is_some() {
        frames += 1;
        assert!(frames < 1_000, "animation never finished");
    }
}

fn finish_fade(m: &mut Model) {
    let mut frames = 0;
    while m.update(fade_frame(m)).is_some() {
        frames += 1;
        assert!(frames < 1_000, "fade never finished");
    }
}

struct Levels;

impl DataSource for Levels {
    fn string_for_progress(&self, progress: f64) -> String {
        match progress {
            p if p < 0.33 => "Low".to_string(),
            p if p < 0.66 => "Medium".to_string(),
            _ => "High".to_string(),
        }
    }

    fn all_strings(&self) -> Vec<String> {
        vec!["Low".into(), "Medium".into(), "High".into()]
    }
}

#[derive(Default)]
struct Recorder {
    will_display: Mutex<Vec<i64>>,
    did_hide: Mutex<Vec<i64>>,
}

impl Delegate for Recorder {
    fn will_display_pop_up(&self, progress_id: i64) {
        self.will_display.lock().unwrap().push(progress_id);
    }

    fn did_hide_pop_up(&self, progress_id: i64) {
        self.did_hide.lock().unwrap().push(progress_id);
    }
}

#[test]
fn test_new_defaults() {
    let m = new(&[]);
    assert_eq!(m.width, 40);
    assert_eq!(m.full, '█');
    assert_eq!(m.empty, '░');
    assert_eq!(m.progress(), 0.0);
    assert_eq!(m.animation_duration(), Duration::from_millis(500));
    assert_eq!(m.pop_up_view_corner_radius(), 4.0);
    assert_eq!(m.text_color(), Rgba::WHITE);
    assert_eq!(m.font(), Font::default());
    assert!(!m.continuously_adjust_pop_up_view_size());
    assert!(!m.is_pop_up_visible());
    assert!(m.pop_up_view_animated_colors().is_none());
    assert!(m.resolved_color().is_none());
    assert_eq!(m.pop_up().text(), "0%");
}

#[test]
fn test_unique_ids() {
    let a = new(&[]);
    let b = new(&[]);
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_options_are_applied() {
    let m = new(&[
        with_width(60),
        with_fill_characters('=', '-'),
        with_track_tint_color(Rgba::BLACK),
        with_text_color(red()),
        with_font(Some(Font::regular())),
        with_pop_up_view_color(blue()),
        with_pop_up_view_corner_radius(0.0),
        with_continuously_adjust_pop_up_view_size(true),
        with_animation_duration(Duration::from_millis(100)),
    ]);
    assert_eq!(m.width, 60);
    assert_eq!(m.full, '=');
    assert_eq!(m.empty, '-');
    assert_eq!(m.track_tint_color(), Rgba::BLACK);
    assert_eq!(m.text_color(), red());
    assert_eq!(m.font(), Font::regular());
    assert_eq!(m.pop_up_view_color(), blue());
    assert_eq!(m.progress_tint_color(), blue());
    assert_eq!(m.pop_up_view_corner_radius(), 0.0);
    assert!(m.continuously_adjust_pop_up_view_size());
    assert_eq!(m.animation_duration(), Duration::from_millis(100));
}

#[test]
fn test_progress_is_clamped() {
    let mut m = new(&[]);

    m.set_progress(-0.3, false);
    assert_eq!(m.progress(), 0.0);
    assert_eq!(m.pop_up().text(), "0%");

    m.set_progress(1.7, false);
    assert_eq!(m.progress(), 1.0);
    assert_eq!(m.pop_up().text(), "100%");

    m.set_progress(f64::NAN, false);
    assert_eq!(m.progress(), 0.0);
}

#[test]
fn test_percent_text_rounds() {
    assert_eq!(percent_text(0.0), "0%");
    assert_eq!(percent_text(0.004), "0%");
    assert_eq!(percent_text(0.005), "1%");
    assert_eq!(percent_text(0.256), "26%");
    assert_eq!(percent_text(1.0), "100%");
    assert_eq!(percent_text(2.0), "100%");
}

#[test]
fn test_static_size_fits_widest_percentage() {
    let mut m = new(&[]);
    let widest = m.pop_up().size_for_text("100%");
    assert_eq!(m.static_pop_up_size(), widest);

    m.set_progress(0.05, false);
    assert_eq!(m.pop_up().frame().size(), widest);
}

#[test]
fn test_data_source_sizes_for_longest_label() {
    let levels = Arc::new(Levels);
    let mut m = new(&[]);
    m.set_data_source(&levels);

    assert!(m.has_data_source());
    assert!(m.continuously_adjust_pop_up_view_size());
    assert_eq!(
        m.static_pop_up_size(),
        m.pop_up().size_for_text("Medium")
    );

    m.set_progress(0.1, false);
    assert_eq!(m.pop_up().text(), "Low");
    assert_eq!(m.pop_up().frame().size(), m.pop_up().size_for_text("Low"));

    m.set_progress(0.5, false);
    assert_eq!(m.pop_up().text(), "Medium");

    m.set_progress(0.9, false);
    assert_eq!(m.pop_up().text(), "High");
}

#[test]
fn test_dropped_data_source_falls_back_to_percentage() {
    let levels = Arc::new(Levels);
    let mut m = new(&[with_data_source(&levels)]);

    m.set_progress(0.1, false);
    assert_eq!(m.pop_up().text(), "Low");

    drop(levels);
    assert!(!m.has_data_source());

    m.set_progress(0.5, false);
    assert_eq!(m.pop_up().text(), "50%");
}

#[test]
fn test_clear_data_source_restores_percentage_size() {
    let levels = Arc::new(Levels);
    let mut m = new(&[with_data_source(&levels)]);
    m.clear_data_source();

    assert!(!m.has_data_source());
    assert_eq!(m.static_pop_up_size(), m.pop_up().size_for_text("100%"));
    assert_eq!(m.pop_up().text(), "0%");
}

#[test]
fn test_font_change_updates_static_size() {
    let mut m = new(&[]);
    let before = m.static_pop_up_size();

    m.set_font(Some(Font {
        letter_spacing: 1,
        ..Font::default()
    }));

    let after = m.static_pop_up_size();
    assert_eq!(after.width, before.width + 3.0);
    assert_eq!(m.pop_up().frame().size(), after);

    m.set_font(None);
    assert_eq!(m.static_pop_up_size(), before);
}

#[test]
fn test_three_colors_are_spread_evenly() {
    let mut m = new(&[]);
    m.set_pop_up_view_animated_colors(&[red(), green(), blue()])
        .expect("valid colors");

    let timeline = m
        .pop_up()
        .color_source()
        .timeline()
        .expect("timeline installed");
    let positions: Vec<f64> = timeline.stops().iter().map(|stop| stop.position).collect();
    assert_eq!(positions, vec![0.0, 0.5, 1.0]);
    assert_eq!(m.pop_up_view_animated_colors(), Some(vec![red(), green(), blue()]));

    m.set_progress(0.5, false);
    assert_eq!(m.pop_up_view_color(), green());
    assert_eq!(m.progress_tint_color(), green());
}

#[test]
fn test_mismatched_positions_keep_previous_colors() {
    let mut m = new(&[with_pop_up_view_color(blue())]);

    let err = m
        .set_pop_up_view_animated_colors_with_positions(&[red(), green(), blue()], &[0.0, 1.0])
        .unwrap_err();

    assert_eq!(
        err,
        ColorError::MismatchedPositions {
            colors: 3,
            positions: 2
        }
    );
    assert!(m.pop_up_view_animated_colors().is_none());
    assert_eq!(m.pop_up_view_color(), blue());
}

#[test]
fn test_invalid_color_option_is_ignored() {
    let m = new(&[
        with_pop_up_view_color(green()),
        with_pop_up_view_animated_colors_and_positions(vec![red(), blue()], vec![0.0]),
    ]);
    assert!(m.pop_up_view_animated_colors().is_none());
    assert_eq!(m.pop_up_view_color(), green());
}

#[test]
fn test_static_color_replaces_timeline() {
    let mut m = new(&[with_pop_up_view_animated_colors(vec![red(), blue()])]);
    assert!(m.pop_up_view_animated_colors().is_some());

    m.set_pop_up_view_color(green());
    assert!(m.pop_up_view_animated_colors().is_none());
    assert_eq!(m.pop_up_view_color(), green());
    assert_eq!(m.progress_tint_color(), green());
}

#[test]
fn test_layout_centres_pop_up_over_thumb() {
    let mut m = new(&[with_width(40)]);
    m.set_progress(0.5, false);

    let size = m.static_pop_up_size();
    let frame = m.pop_up().frame();
    assert_eq!(
        frame,
        Rect::new(20.0 - size.width / 2.0, -size.height, size.width, size.height)
    );
    assert_eq!(frame.x + m.pop_up().arrow_offset(), 20.0);
}

#[test]
fn test_layout_stays_inside_track() {
    let mut m = new(&[with_width(40)]);

    m.set_progress(0.0, false);
    assert_eq!(m.pop_up().frame().x, 0.0);

    m.set_progress(1.0, false);
    assert_eq!(m.pop_up().frame().max_x(), 40.0);
}

#[test]
fn test_animated_progress_resolves_color() {
    let mut m = new(&[with_pop_up_view_animated_colors(vec![red(), blue()])]);

    let cmd = m.set_progress(0.5, true);
    assert!(cmd.is_some());
    assert_eq!(m.progress(), 0.5);
    assert!(m.pop_up().is_animating());
    assert_eq!(m.pop_up().text(), "50%");
    assert!(m.resolved_color().is_none());

    finish_update(&mut m);

    let expected = m.pop_up().color_for_offset(0.5);
    assert!(!m.pop_up().is_animating());
    assert_eq!(m.resolved_color(), Some(expected));
    assert_eq!(m.progress_tint_color(), expected.opaque());
    assert_eq!(m.pop_up().offset(), 0.5);
}

#[test]
fn test_fill_color_follows_pop_up_during_animation() {
    let mut m = new(&[with_pop_up_view_animated_colors(vec![red(), blue()])]);
    m.set_progress(1.0, true);

    m.update(update_frame(&m));
    m.update(update_frame(&m));

    let offset = m.pop_up().offset();
    assert!(offset > 0.0 && offset < 1.0);
    assert_eq!(m.progress_tint_color(), m.pop_up().color_for_offset(offset));
}

#[test]
fn test_new_animation_resolves_previous_one() {
    let mut m = new(&[with_pop_up_view_animated_colors(vec![red(), blue()])]);
    m.set_progress(0.2, true);
    m.set_progress(0.8, true);

    // The first animation was cut off before any frame ran.
    assert_eq!(m.resolved_color(), Some(red()));
    assert!(m.pop_up().is_animating());

    finish_update(&mut m);
    assert_eq!(m.resolved_color(), Some(m.pop_up().color_for_offset(0.8)));
}

#[test]
fn test_zero_duration_updates_immediately() {
    let mut m = new(&[
        with_animation_duration(Duration::ZERO),
        with_pop_up_view_animated_colors(vec![red(), blue()]),
    ]);

    let cmd = m.set_progress(1.0, true);
    assert!(cmd.is_none());
    assert_eq!(m.resolved_color(), Some(blue()));
    assert_eq!(m.pop_up().offset(), 1.0);
}

#[test]
fn test_frames_for_other_instances_are_ignored() {
    let mut a = new(&[]);
    let mut b = new(&[]);
    a.set_progress(1.0, true);
    b.set_progress(1.0, true);

    assert!(a.update(update_frame(&b)).is_none());
    assert_eq!(a.pop_up().offset(), 0.0);
}

#[test]
fn test_delegate_notified_on_show_and_hide() {
    let recorder = Arc::new(Recorder::default());
    let mut m = new(&[with_delegate(&recorder)]);

    m.show_pop_up_view(false);
    m.show_pop_up_view(false);
    assert!(m.is_pop_up_visible());
    assert_eq!(*recorder.will_display.lock().unwrap(), vec![m.id()]);

    m.hide_pop_up_view(false);
    m.hide_pop_up_view(false);
    assert!(!m.is_pop_up_visible());
    assert_eq!(*recorder.did_hide.lock().unwrap(), vec![m.id()]);
}

#[test]
fn test_will_display_runs_before_pop_up_is_shown() {
    let recorder = Arc::new(Recorder::default());
    let mut m = new(&[with_delegate(&recorder)]);

    // Same hook the controller uses, observed from inside.
    let id = m.id();
    let mut seen = Vec::new();
    m.bubble.show_with(false, |bubble| {
        seen.push((bubble.is_visible(), bubble.opacity()));
        recorder.will_display_pop_up(id);
    });
    assert_eq!(seen, vec![(false, 0.0)]);
    m.hide_pop_up_view(false);

    let cmd = m.show_pop_up_view(true);
    assert!(cmd.is_some());
    assert_eq!(recorder.will_display.lock().unwrap().len(), 2);
    assert_eq!(m.pop_up().opacity(), 0.0);
}

#[test]
fn test_reshow_during_fade_out_notifies_again() {
    let recorder = Arc::new(Recorder::default());
    let mut m = new(&[]);
    m.set_delegate(&recorder);
    m.show_pop_up_view(false);

    m.hide_pop_up_view(true);
    m.update(fade_frame(&m));
    assert!(!m.is_pop_up_visible());
    assert!(m.pop_up().opacity() > 0.0);

    m.show_pop_up_view(true);
    assert_eq!(recorder.will_display.lock().unwrap().len(), 2);
    assert!(recorder.did_hide.lock().unwrap().is_empty());
}

#[test]
fn test_data_source_attached_mid_animation_reaches_pop_up() {
    let levels = Arc::new(Levels);
    let mut m = new(&[]);
    m.set_progress(0.9, true);
    m.update(update_frame(&m));

    m.set_data_source(&levels);
    assert!(m.pop_up().is_animating());
    assert_eq!(m.pop_up().text(), "High");

    finish_update(&mut m);
    assert_eq!(m.pop_up().text(), "High");
    assert_eq!(m.pop_up().frame().size(), m.pop_up().size_for_text("High"));
    assert_eq!(m.pop_up().offset(), 0.9);
}

#[test]
fn test_font_change_mid_animation_resizes_pop_up() {
    let mut m = new(&[]);
    m.set_progress(0.5, true);
    m.update(update_frame(&m));

    m.set_font(Some(Font {
        letter_spacing: 3,
        ..Font::default()
    }));
    finish_update(&mut m);

    let size = m.static_pop_up_size();
    assert_eq!(size.width, m.pop_up().size_for_text("100%").width);
    assert_eq!(m.pop_up().frame().size(), size);
    assert_eq!(m.pop_up().frame().x + m.pop_up().arrow_offset(), 20.0);
}

#[test]
fn test_clear_data_source_mid_animation_restores_percentage() {
    let levels = Arc::new(Levels);
    let mut m = new(&[with_data_source(&levels)]);
    m.set_progress(0.2, true);
    m.update(update_frame(&m));

    m.clear_data_source();
    m.set_continuously_adjust_pop_up_view_size(false);
    finish_update(&mut m);

    assert_eq!(m.pop_up().text(), "20%");
    assert_eq!(m.pop_up().frame().size(), m.static_pop_up_size());
}

#[test]
fn test_animated_hide_notifies_after_fade() {
    let recorder = Arc::new(Recorder::default());
    let mut m = new(&[with_delegate(&recorder)]);
    m.show_pop_up_view(false);

    let cmd = m.hide_pop_up_view(true);
    assert!(cmd.is_some());
    assert!(recorder.did_hide.lock().unwrap().is_empty());

    finish_fade(&mut m);
    assert_eq!(m.pop_up().opacity(), 0.0);
    assert_eq!(recorder.did_hide.lock().unwrap().len(), 1);
}

#[test]
fn test_hide_resolves_running_animation() {
    let mut m = new(&[with_pop_up_view_animated_colors(vec![red(), blue()])]);
    m.show_pop_up_view(false);
    m.set_progress(1.0, true);
    m.update(update_frame(&m));

    m.hide_pop_up_view(false);

    assert!(!m.pop_up().is_animating());
    let shown = m.pop_up().color();
    assert_eq!(m.resolved_color(), Some(shown));
}

#[test]
fn test_dropped_delegate_is_not_called() {
    let recorder = Arc::new(Recorder::default());
    let mut m = new(&[with_delegate(&recorder)]);
    drop(recorder);

    m.show_pop_up_view(false);
    assert!(m.is_pop_up_visible());
}

#[test]
fn test_view_reserves_rows_while_hidden() {
    let mut m = new(&[with_width(20)]);
    m.set_progress(0.5, false);

    let view = lipgloss::strip_ansi(&m.view());
    let lines: Vec<&str> = view.split('\n').collect();
    let height = m.static_pop_up_size().height as usize;

    assert_eq!(lines.len(), height + 1);
    assert!(lines[..height].iter().all(|line| line.is_empty()));
    assert_eq!(lines[height], format!("{}{}", "█".repeat(10), "░".repeat(10)));
}

#[test]
fn test_view_draws_pop_up_above_thumb() {
    let mut m = new(&[with_width(20)]);
    m.show_pop_up_view(false);
    m.set_progress(0.5, false);

    let view = lipgloss::strip_ansi(&m.view());
    let lines: Vec<&str> = view.split('\n').collect();
    let indent = " ".repeat(m.pop_up().frame().x as usize);

    assert!(lines[0].starts_with(&format!("{indent}╭")));
    assert!(lines.iter().any(|line| line.contains("50%")));
    assert_eq!(lipgloss::width_visible(lines[lines.len() - 1]), 20);
}

#[test]
fn test_view_as_ignores_pop_up() {
    let m = new(&[with_width(10), with_fill_characters('=', '-')]);
    assert_eq!(lipgloss::strip_ansi(&m.view_as(0.0)), "----------");
    assert_eq!(lipgloss::strip_ansi(&m.view_as(1.0)), "==========");
    assert_eq!(lipgloss::strip_ansi(&m.view_as(0.3)), "===-------");
}

proptest! {
    #[test]
    fn prop_pop_up_stays_inside_track(progress in 0.0f64..=1.0, width in 10i32..120) {
        let mut m = new(&[with_width(width)]);
        m.set_progress(progress, false);

        let frame = m.pop_up().frame();
        prop_assert!(frame.x >= 0.0);
        prop_assert!(frame.max_x() <= f64::from(width) + 1e-9);
        prop_assert_eq!(m.pop_up().text(), percent_text(progress));
    }
}
