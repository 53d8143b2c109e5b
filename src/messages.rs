/*!
 * Operator-facing explanations of per-record failures.
 *
 * The wording is fixed per failure kind and locale; only `UncertainMatch`
 * interpolates its evidence. Locales are validated when the configuration is
 * loaded, so `explain` is total.
 */

use crate::app_config::Locale;
use crate::errors::ProcessingError;

/// Explain a processing failure in the given locale
pub fn explain(error: &ProcessingError, locale: Locale) -> String {
    match (error, locale) {
        (ProcessingError::NoRating, Locale::En) => {
            "Movie has no rating. Try to add it to Check-in list manually".to_string()
        }
        (ProcessingError::NoRating, Locale::Ru) => {
            "У фильма нет оценки. Добавь в список Check-in вручную".to_string()
        }
        (ProcessingError::NotFound, Locale::En) => {
            "Movie not found. Find and rate it manually".to_string()
        }
        (ProcessingError::NotFound, Locale::Ru) => {
            "Фильм не найден. Оцени его вручную".to_string()
        }
        (ProcessingError::UpdateRatingFailed, Locale::En) => {
            "IMDb API error. Try to update session. If error persist, you're welcome to create an issue on github".to_string()
        }
        (ProcessingError::UpdateRatingFailed, Locale::Ru) => {
            "Ошибка IMDb API. Попробуй обновить куки IMDb в конфиге. Если не поможет, можешь создать issue на гитхабе".to_string()
        }
        (ProcessingError::ServiceRateLimited, Locale::En) => {
            "OMDb API limit exceeded. Try again tomorrow".to_string()
        }
        (ProcessingError::ServiceRateLimited, Locale::Ru) => {
            "Превышен лимит запросов к OMDb. Попробуй повторить завтра".to_string()
        }
        (ProcessingError::UncertainMatch(evidence), Locale::En) => format!(
            "Rating is added to IMDb, but check if movie is correct. Kinopoisk title - '{}' ({}), searched as '{}' ({}), IMDb title - '{}' ({})",
            evidence.title,
            year_label(evidence.year),
            evidence.searched_as,
            year_label(evidence.searched_year),
            evidence.matched_title,
            evidence.external_id
        ),
        (ProcessingError::UncertainMatch(evidence), Locale::Ru) => format!(
            "Рейтинг проставлен на IMDb, но нужно убедиться, что оценен корректный фильм. Название на КП - '{}' ({}), поисковый запрос '{}' ({}), фильм на IMDb - '{}' ({})",
            evidence.title,
            year_label(evidence.year),
            evidence.searched_as,
            year_label(evidence.searched_year),
            evidence.matched_title,
            evidence.external_id
        ),
    }
}

fn year_label(year: Option<u16>) -> String {
    year.map(|year| year.to_string())
        .unwrap_or_else(|| "-".to_string())
}
