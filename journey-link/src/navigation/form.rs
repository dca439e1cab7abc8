//! The navigation form controller.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::domain::Stop;
use crate::search::{SearchDebouncer, SearchState};
use crate::stopfinder::StopFinder;

use super::deeplink::{DeepLink, DeepLinkBuilder};
use super::session::SessionContext;
use super::validate::{
    Field, FormState, ValidationResult, check_navigation, validate_address, validate_date,
    validate_time, validate_navigation,
};

/// Owns the form state and connects it to search, validation and links.
///
/// The UI layer forwards edits and selections here and renders what comes
/// back: candidate lists from [`candidates`](Self::candidates), error maps
/// from [`submit`](Self::submit).
pub struct NavigationForm<F> {
    form: FormState,
    search: SearchDebouncer<F>,
    session: Arc<SessionContext>,
    links: DeepLinkBuilder,
}

impl<F: StopFinder + 'static> NavigationForm<F> {
    /// Create an empty form for the session's destination.
    pub fn new(
        session: Arc<SessionContext>,
        search: SearchDebouncer<F>,
        links: DeepLinkBuilder,
    ) -> Self {
        Self {
            form: FormState::default(),
            search,
            session,
            links,
        }
    }

    /// Current form contents.
    pub fn state(&self) -> &FormState {
        &self.form
    }

    /// The session this form builds links for.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Replace the date field's text.
    pub fn set_date(&mut self, date: impl Into<String>) {
        self.form.date = date.into();
    }

    /// Replace the time field's text.
    pub fn set_time(&mut self, time: impl Into<String>) {
        self.form.time = time.into();
    }

    /// Record an edit of the address field and schedule a search.
    ///
    /// Editing the text clears any earlier selection, since the selected
    /// stop no longer corresponds to what the field shows.
    pub fn input_address(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.form.selected_stop.take().is_some() {
            debug!("address edited, clearing selected stop");
        }
        self.form.from_address = text.clone();
        self.search.trigger(text);
    }

    /// Receiver for candidate list updates.
    pub fn candidates(&self) -> watch::Receiver<SearchState> {
        self.search.subscribe()
    }

    /// The candidate list as it stands now.
    pub fn current_candidates(&self) -> SearchState {
        self.search.current()
    }

    /// Make `stop` the selected origin.
    ///
    /// This is the only way a stop enters the form. The address field takes
    /// the stop's name, without starting a new search.
    pub fn select(&mut self, stop: Stop) {
        debug!(id = %stop.id, name = %stop.name, "stop selected");
        self.form.from_address = stop.name.clone();
        self.form.selected_stop = Some(stop);
    }

    /// Select the candidate at `index` in the current list.
    ///
    /// Returns the selected stop, or `None` if there is no such candidate.
    pub fn select_candidate(&mut self, index: usize) -> Option<&Stop> {
        let stop = self.search.current().stops().get(index).cloned()?;
        self.select(stop);
        self.form.selected_stop.as_ref()
    }

    /// Inline feedback for a single field while typing.
    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        let check = match field {
            Field::FromAddress => validate_address(&self.form.from_address),
            Field::Date => validate_date(&self.form.date),
            Field::Time => validate_time(&self.form.time),
        };
        check.err()
    }

    /// Validate the whole form without building a link.
    pub fn validate(&self) -> ValidationResult {
        validate_navigation(&self.form)
    }

    /// Validate the form and, if it passes, build the deep link.
    pub fn submit(&self) -> Result<DeepLink, ValidationResult> {
        let request = check_navigation(&self.form).inspect_err(|result| {
            debug!(first_error = result.first_error, "navigation blocked");
        })?;

        let link = self.links.build(
            &request.origin.id,
            self.session.destination_id(),
            request.date,
            request.time,
        );
        info!(%link, "deep link built");
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::{Coord, StopId};
    use crate::navigation::{DeepLinkConfig, messages};
    use crate::search::DEFAULT_QUIET_PERIOD;
    use crate::stopfinder::MockStopFinder;

    const DESTINATION: &str = "Mergelteichstraße 80, 44225 Dortmund";

    fn stop(id: &str, name: &str) -> Stop {
        Stop::new(StopId::new(id).unwrap(), name, Coord::new(51.5, 7.4))
    }

    fn finder() -> MockStopFinder {
        MockStopFinder::new()
            .with_stops(DESTINATION, vec![stop("B2", "Mergelteichstraße")])
            .with_stops(
                "Dortmund Hbf",
                vec![stop("A1", "Dortmund Hbf"), stop("A2", "Dortmund Hbf Nord")],
            )
    }

    async fn form(finder: &MockStopFinder) -> NavigationForm<MockStopFinder> {
        let session = SessionContext::initialize(finder, DESTINATION).await.unwrap();
        let search = SearchDebouncer::new(Arc::new(finder.clone()), DEFAULT_QUIET_PERIOD);
        let links =
            DeepLinkBuilder::new(DeepLinkConfig::new().with_base_url("https://example.org/trip"));
        NavigationForm::new(Arc::new(session), search, links)
    }

    #[tokio::test(start_paused = true)]
    async fn search_select_submit() {
        let finder = finder();
        let mut form = form(&finder).await;

        form.input_address("Dortmund Hbf");
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(form.current_candidates().stops().len(), 2);

        let selected = form.select_candidate(0).unwrap();
        assert_eq!(selected.id.as_str(), "A1");
        assert_eq!(form.state().from_address, "Dortmund Hbf");

        form.set_date("2024-05-01");
        form.set_time("14:05");

        assert_eq!(form.session().destination_id().as_str(), "B2");
        let link = form.submit().unwrap();
        assert_eq!(
            link.as_str(),
            "https://example.org/trip?origin=A1&destination=B2&date=01052024&time=1405"
        );
    }

    #[tokio::test]
    async fn submit_without_selection_is_blocked() {
        let finder = finder();
        let mut form = form(&finder).await;
        form.set_date("2024-05-01");
        form.set_time("14:05");

        let result = form.submit().unwrap_err();
        assert!(!result.is_valid);
        assert_eq!(result.first_error, messages::STOP_NOT_SELECTED);
    }

    #[tokio::test]
    async fn editing_address_clears_selection() {
        let finder = finder();
        let mut form = form(&finder).await;

        form.select(stop("A1", "Dortmund Hbf"));
        assert!(form.state().selected_stop.is_some());

        form.input_address("Dortmund Hb");
        assert!(form.state().selected_stop.is_none());
        assert_eq!(form.state().from_address, "Dortmund Hb");
    }

    #[tokio::test]
    async fn select_candidate_out_of_range() {
        let finder = finder();
        let mut form = form(&finder).await;
        assert!(form.select_candidate(0).is_none());
        assert!(form.state().selected_stop.is_none());
    }

    #[tokio::test]
    async fn selecting_does_not_search() {
        let finder = finder();
        let mut form = form(&finder).await;

        form.select(stop("A1", "Dortmund Hbf"));
        tokio::time::sleep(Duration::from_millis(10)).await;

        // Only the startup lookup of the destination.
        assert_eq!(finder.calls(), vec![DESTINATION.to_string()]);
    }

    #[tokio::test]
    async fn inline_field_feedback() {
        let finder = finder();
        let mut form = form(&finder).await;

        assert_eq!(
            form.field_error(Field::FromAddress),
            Some(messages::FIELD_ADDRESS_REQUIRED)
        );
        assert_eq!(form.field_error(Field::Date), None);

        form.set_time("25:00");
        assert_eq!(form.field_error(Field::Time), Some(messages::TIME_INVALID));

        form.set_date("2024-05-01");
        assert_eq!(form.field_error(Field::Date), None);
        assert!(!form.validate().is_valid);
    }
}
