//! Trip generation and day/activity mutators.
//!
//! # Invariants
//! - Day numbers stay contiguous `1..=N` after every mutation.
//! - Generating an itinerary replaces both the trip and all days.

use crate::dates::{inclusive_day_count, next_day, parse_iso_date};
use crate::forms::{fields, ActivityForm, TripForm};
use crate::model::trip::{renumber_days, Activity, ActivityId, ItineraryDay, Trip};
use crate::model::validation::ValidationError;
use crate::repo::state_repo::StateRepository;
use crate::service::store::{Section, StoreResult, TravelStore};
use crate::text::{normalize_block, normalize_line};
use chrono::NaiveDate;
use log::info;

/// Longest trip, in calendar days, an itinerary is generated for.
pub const MAX_TRIP_DAYS: u32 = 366;

impl<R: StateRepository> TravelStore<R> {
    /// Creates the trip and regenerates one empty day per calendar day.
    ///
    /// Returns the number of generated days.
    pub fn generate_itinerary(&mut self, form: &TripForm) -> StoreResult<usize> {
        let trip = match parse_trip(form) {
            Ok(trip) => trip,
            Err(err) => return Self::reject("itinerary_generate", err),
        };

        let days = build_itinerary(trip.start_date, trip.end_date);
        let count = days.len();
        let state = self.state_mut();
        state.current_trip = Some(trip);
        state.itinerary = days;
        self.commit(Section::Itinerary)?;

        info!("event=itinerary_generate module=store status=ok days={count}");
        Ok(count)
    }

    /// Appends a day dated after the current last day.
    ///
    /// With an empty itinerary the new day takes the trip start date.
    /// Returns the new day number.
    pub fn add_day(&mut self) -> StoreResult<u32> {
        let Some(trip_start) = self.state().current_trip.as_ref().map(|trip| trip.start_date)
        else {
            return Self::reject("day_add", ValidationError::NoTrip);
        };

        let state = self.state_mut();
        let date = state
            .itinerary
            .last()
            .map(|day| next_day(day.date))
            .unwrap_or(trip_start);
        let number = u32::try_from(state.itinerary.len() + 1).unwrap_or(u32::MAX);
        state.itinerary.push(ItineraryDay::new(number, date));
        self.commit(Section::Itinerary)?;

        info!("event=day_add module=store status=ok day={number}");
        Ok(number)
    }

    /// Removes day `day` and renumbers the rest. Returns `false` when stale.
    ///
    /// Callers obtain traveler confirmation before calling.
    pub fn delete_day(&mut self, day: u32) -> StoreResult<bool> {
        let itinerary = &mut self.state_mut().itinerary;
        let before = itinerary.len();
        itinerary.retain(|entry| entry.day != day);
        if itinerary.len() == before {
            return Ok(false);
        }
        renumber_days(itinerary);
        let remaining = itinerary.len();
        self.commit(Section::Itinerary)?;

        info!("event=day_delete module=store status=ok day={day} remaining={remaining}");
        Ok(true)
    }

    /// Overwrites the title of day `day`. Returns `false` when stale.
    pub fn rename_day(&mut self, day: u32, title: &str) -> StoreResult<bool> {
        let Some(entry) = self
            .state_mut()
            .itinerary
            .iter_mut()
            .find(|entry| entry.day == day)
        else {
            return Ok(false);
        };
        entry.title = normalize_line(title);
        self.commit(Section::Itinerary)?;

        info!("event=day_rename module=store status=ok day={day}");
        Ok(true)
    }

    /// Appends an activity to day `day`.
    ///
    /// Returns `None` when the day no longer exists.
    pub fn add_activity(
        &mut self,
        day: u32,
        form: &ActivityForm,
    ) -> StoreResult<Option<ActivityId>> {
        let activity = match parse_activity(form) {
            Ok(activity) => activity,
            Err(err) => return Self::reject("activity_add", err),
        };

        let Some(entry) = self
            .state_mut()
            .itinerary
            .iter_mut()
            .find(|entry| entry.day == day)
        else {
            return Ok(None);
        };
        let id = activity.id;
        entry.activities.push(activity);
        self.commit(Section::Itinerary)?;

        info!("event=activity_add module=store status=ok day={day} activity_id={id}");
        Ok(Some(id))
    }

    /// Removes one activity from day `day`. Returns `false` when stale.
    pub fn delete_activity(&mut self, day: u32, activity: ActivityId) -> StoreResult<bool> {
        let Some(entry) = self
            .state_mut()
            .itinerary
            .iter_mut()
            .find(|entry| entry.day == day)
        else {
            return Ok(false);
        };
        let before = entry.activities.len();
        entry.activities.retain(|existing| existing.id != activity);
        if entry.activities.len() == before {
            return Ok(false);
        }
        self.commit(Section::Itinerary)?;

        info!("event=activity_delete module=store status=ok day={day} activity_id={activity}");
        Ok(true)
    }

    /// Explicitly persists the itinerary. Requires a trip.
    pub fn save_itinerary(&mut self) -> StoreResult<()> {
        if self.state().current_trip.is_none() {
            return Self::reject("itinerary_save", ValidationError::NoTrip);
        }
        self.persist()?;
        info!(
            "event=itinerary_save module=store status=ok days={}",
            self.state().itinerary.len()
        );
        Ok(())
    }
}

/// One empty day per calendar day from `start` to `end` inclusive.
pub fn build_itinerary(start: NaiveDate, end: NaiveDate) -> Vec<ItineraryDay> {
    let count = inclusive_day_count(start, end);
    let mut days = Vec::with_capacity(count as usize);
    let mut date = start;
    for number in 1..=count {
        days.push(ItineraryDay::new(number, date));
        date = next_day(date);
    }
    days
}

fn parse_trip(form: &TripForm) -> Result<Trip, ValidationError> {
    let name = normalize_line(&form.name);
    let destination = normalize_line(&form.destination);
    if name.is_empty()
        || destination.is_empty()
        || form.start_date.trim().is_empty()
        || form.end_date.trim().is_empty()
    {
        return Err(ValidationError::MissingTripDetails);
    }

    let start_date = parse_iso_date(fields::START_DATE, &form.start_date)?;
    let end_date = parse_iso_date(fields::END_DATE, &form.end_date)?;
    if end_date < start_date {
        return Err(ValidationError::EndBeforeStart);
    }
    let days = inclusive_day_count(start_date, end_date);
    if days > MAX_TRIP_DAYS {
        return Err(ValidationError::TripTooLong {
            days,
            max: MAX_TRIP_DAYS,
        });
    }

    let travelers_raw = form.travelers.trim();
    let travelers = if travelers_raw.is_empty() {
        None
    } else {
        Some(
            travelers_raw
                .parse::<u32>()
                .map_err(|_| ValidationError::InvalidTravelerCount(travelers_raw.to_string()))?,
        )
    };

    Ok(Trip {
        name,
        destination,
        start_date,
        end_date,
        travelers,
        traveler_names: normalize_line(&form.traveler_names),
    })
}

fn parse_activity(form: &ActivityForm) -> Result<Activity, ValidationError> {
    let title = normalize_line(&form.title);
    if title.is_empty() {
        return Err(ValidationError::MissingActivityTitle);
    }
    let cost = parse_cost(&form.cost)?;
    Ok(Activity::new(
        title,
        normalize_block(&form.description),
        normalize_line(&form.location),
        cost,
    ))
}

/// Blank or unparseable cost means 0; a negative number is rejected.
fn parse_cost(raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(cost) if !cost.is_finite() => Ok(0.0),
        Ok(cost) if cost < 0.0 => Err(ValidationError::NegativeActivityCost),
        Ok(cost) => Ok(cost),
        Err(_) => Ok(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::{build_itinerary, parse_cost, parse_trip, MAX_TRIP_DAYS};
    use crate::forms::TripForm;
    use crate::model::validation::ValidationError;
    use chrono::NaiveDate;

    fn form(start: &str, end: &str) -> TripForm {
        TripForm {
            name: "Summer".to_string(),
            destination: "Lisbon".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            ..TripForm::default()
        }
    }

    #[test]
    fn build_itinerary_spans_month_boundary() {
        let days = build_itinerary(
            NaiveDate::from_ymd_opt(2024, 6, 29).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 2).unwrap(),
        );
        assert_eq!(days.len(), 4);
        assert_eq!(days[3].day, 4);
        assert_eq!(days[3].date, NaiveDate::from_ymd_opt(2024, 7, 2).unwrap());
        assert_eq!(days[3].title, "Day 4 Activities");
    }

    #[test]
    fn parse_trip_rejects_blank_and_reversed_input() {
        let mut blank = form("2024-06-01", "2024-06-03");
        blank.destination = "   ".to_string();
        assert_eq!(parse_trip(&blank), Err(ValidationError::MissingTripDetails));
        assert_eq!(
            parse_trip(&form("2024-06-03", "2024-06-01")),
            Err(ValidationError::EndBeforeStart)
        );
    }

    #[test]
    fn parse_trip_caps_trip_length() {
        assert_eq!(
            parse_trip(&form("2024-06-01", "9024-06-01")),
            Err(ValidationError::TripTooLong {
                days: 2_556_698,
                max: MAX_TRIP_DAYS,
            })
        );
        let year = parse_trip(&form("2024-01-01", "2024-12-31")).unwrap();
        assert_eq!(year.end_date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert!(matches!(
            parse_trip(&form("2024-01-01", "2025-01-01")),
            Err(ValidationError::TripTooLong { days: 367, .. })
        ));
    }

    #[test]
    fn parse_trip_rejects_non_numeric_traveler_count() {
        let mut input = form("2024-06-01", "2024-06-03");
        input.travelers = "two".to_string();
        assert_eq!(
            parse_trip(&input),
            Err(ValidationError::InvalidTravelerCount("two".to_string()))
        );
        input.travelers = " 2 ".to_string();
        assert_eq!(parse_trip(&input).unwrap().travelers, Some(2));
    }

    #[test]
    fn cost_defaults_to_zero_when_unparseable() {
        assert_eq!(parse_cost(""), Ok(0.0));
        assert_eq!(parse_cost("free"), Ok(0.0));
        assert_eq!(parse_cost("NaN"), Ok(0.0));
        assert_eq!(parse_cost(" 12.50 "), Ok(12.5));
        assert_eq!(parse_cost("-1"), Err(ValidationError::NegativeActivityCost));
    }
}
