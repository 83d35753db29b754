pub mod test_helpers {
    use crate::event_source::{Event, SimulatedEventSource};

    /// Builder for creating test scenarios with simulated user input
    pub struct TestScenarioBuilder {
        events: Vec<Event>,
    }

    impl Default for TestScenarioBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TestScenarioBuilder {
        pub fn new() -> Self {
            Self { events: Vec::new() }
        }

        /// Add a character key press
        pub fn press_char(mut self, c: char) -> Self {
            self.events.push(SimulatedEventSource::char_key(c));
            self
        }

        /// Left-click a cell
        pub fn click(mut self, column: u16, row: u16) -> Self {
            self.events.push(SimulatedEventSource::click(column, row));
            self
        }

        /// Scroll down over a cell
        pub fn scroll_down(mut self, column: u16, row: u16) -> Self {
            self.events
                .push(SimulatedEventSource::scroll_down(column, row));
            self
        }

        /// Advance n pages (press 'l' n times)
        pub fn next_page(mut self, times: usize) -> Self {
            for _ in 0..times {
                self.events.push(SimulatedEventSource::char_key('l'));
            }
            self
        }

        /// Go back n pages (press 'h' n times)
        pub fn prev_page(mut self, times: usize) -> Self {
            for _ in 0..times {
                self.events.push(SimulatedEventSource::char_key('h'));
            }
            self
        }

        /// Jump to the first page
        pub fn first_page(mut self) -> Self {
            self.events.push(SimulatedEventSource::char_key('g'));
            self
        }

        /// Jump to the last page
        pub fn last_page(mut self) -> Self {
            self.events.push(SimulatedEventSource::char_key('G'));
            self
        }

        /// Quit the app
        pub fn quit(mut self) -> Self {
            self.events.push(SimulatedEventSource::char_key('q'));
            self
        }

        pub fn build(self) -> SimulatedEventSource {
            SimulatedEventSource::new(self.events)
        }
    }
}
