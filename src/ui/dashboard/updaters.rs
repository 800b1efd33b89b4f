//! Dashboard state update logic

use super::state::DashboardState;

impl DashboardState {
    /// Move queued events into the activity log.
    pub fn update(&mut self) {
        while let Some(event) = self.pending_events.pop_front() {
            if event.should_display() {
                self.add_to_activity_log(event);
            }
        }
    }
}
