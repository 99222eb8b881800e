//! Router for the busy times page

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
};
use axum_extra::extract::Form;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::{AppState, Selection};
use crate::calendar::source::{find_busy_times, list_calendars};
use crate::window::{TimeWindow, interpret_daterange, interpret_time};

type SharedState = Arc<RwLock<AppState>>;

fn render_page(state: &SharedState) -> Result<Html<String>, ApiError> {
    let shared_state = state.read().expect("Unable to read shared state");
    let today = shared_state.config.today();
    let view_state = shared_state.view_state(today);
    let html = shared_state.view.render(&view_state, today)?;
    Ok(Html(html))
}

/// Show the form with whatever was last selected
async fn index(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    tracing::debug!("Entering index page");
    render_page(&state)
}

/// Store the posted window and calendar choices. The begin-before-end
/// rule is checked again here since the page only disables its submit
/// button.
async fn set_data(
    State(state): State<SharedState>,
    Form(form): Form<public::SetDataForm>,
) -> Result<Redirect, ApiError> {
    tracing::debug!("In set_data with form: {:?}", form);

    let begin = interpret_time(&form.begin_time).map_err(ApiError::bad_request)?;
    let end = interpret_time(&form.end_time).map_err(ApiError::bad_request)?;
    let window = TimeWindow::new(begin, end).map_err(ApiError::bad_request)?;
    let span = interpret_daterange(&form.daterange).map_err(ApiError::bad_request)?;

    if form.checkbox.is_empty() {
        tracing::debug!("No calendars selected");
    } else {
        tracing::debug!("Selected calendars are: {:?}", form.checkbox);
    }

    state.write().expect("Unable to write shared state").selection = Some(Selection {
        window,
        span,
        selected_calendars: form.checkbox,
    });

    Ok(Redirect::to("/display"))
}

/// Refresh the calendar list and, when calendars are selected, the busy
/// times, then show the page
async fn display(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    let (source, selection, offset) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (
            shared_state.source.clone(),
            shared_state.selection(shared_state.config.today()),
            shared_state.config.utc_offset,
        )
    };

    let Some(source) = source else {
        tracing::warn!("No calendar source configured, staying unauthorized");
        return render_page(&state);
    };

    let calendars = list_calendars(source.as_ref()).await?;
    let busy_times = if selection.selected_calendars.is_empty() {
        tracing::debug!("No calendars already selected");
        vec![]
    } else {
        find_busy_times(
            source.as_ref(),
            &selection.selected_calendars,
            &selection.span,
            &selection.window,
            offset,
        )
        .await?
    };

    {
        let mut shared_state = state.write().expect("Unable to write shared state");
        shared_state.calendars = Some(calendars);
        shared_state.busy_times = busy_times;
    }

    render_page(&state)
}

/// Create the busy times router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(index))
        .route("/index", get(index))
        .route("/setdata", post(set_data))
        .route("/display", get(display))
}
