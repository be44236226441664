//! Collaborator traits for the progress component.

/// Supplies custom label text in place of the percentage.
///
/// The progress component only keeps a weak reference to its data source;
/// the host owns it. Attaching one makes the pop-up resize for every label.
///
/// # Examples
///
/// ```rust
/// use popup_progress::progress::DataSource;
///
/// struct Levels;
///
/// impl DataSource for Levels {
///     fn string_for_progress(&self, progress: f64) -> String {
///         match progress {
///             p if p < 0.33 => "Low".to_string(),
///             p if p < 0.66 => "Medium".to_string(),
///             _ => "High".to_string(),
///         }
///     }
///
///     fn all_strings(&self) -> Vec<String> {
///         vec!["Low".into(), "Medium".into(), "High".into()]
///     }
/// }
/// ```
pub trait DataSource: Send + Sync {
    /// Label for a progress value in `0.0..=1.0`. Called on every change.
    fn string_for_progress(&self, progress: f64) -> String;

    /// Every label this source can produce, used to size the pop-up once.
    fn all_strings(&self) -> Vec<String>;
}

/// Lifecycle notifications for hosts that must manage stacking order,
/// such as a progress bar embedded in a list or table row.
pub trait Delegate: Send + Sync {
    /// Called before the pop-up becomes visible, so the host can bring the
    /// containing row to the front.
    fn will_display_pop_up(&self, progress_id: i64);

    /// Called once the pop-up has finished hiding.
    fn did_hide_pop_up(&self, _progress_id: i64) {}
}
