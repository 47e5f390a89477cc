use std::cell::RefCell;

use saliency_survey_core::SurveySource;

use crate::app_router;

thread_local! {
    static SURVEY_SOURCE: RefCell<Option<SurveySource>> = RefCell::new(None);
}

pub(crate) fn set_survey_source(source: SurveySource) {
    SURVEY_SOURCE.with(|slot| {
        *slot.borrow_mut() = Some(source);
    });
}

pub(crate) fn survey_source() -> SurveySource {
    SURVEY_SOURCE
        .with(|slot| slot.borrow().clone())
        .unwrap_or_else(app_router::load_survey_source)
}
