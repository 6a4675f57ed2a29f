//! The host integration surface.
//!
//! An embedding form mounts a [`DatePicker`] with its props and a change
//! callback, forwards user actions through the delegation methods, and
//! receives one [`DateChangeEvent`] per completed selection. The picker
//! owns its open/closed and navigation state; the host only observes
//! selections.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use derive_more::Constructor;

use crate::events::{Dispatcher, PointerHit, Subscription};
use crate::grid::DayCell;
use crate::jalali;
use crate::locale::Formatter;
use crate::picker::{Clock, DateChangeEvent, Picker};

/// Host-supplied inputs.
#[derive(Debug, Clone, Constructor)]
pub struct PickerProps {
    /// Persian `Y/M/D` text (either digit script) pre-selecting a date.
    pub initial_value: Option<String>,
    /// Label shown while nothing is selected.
    pub placeholder: String,
    pub disabled: bool,
}

impl Default for PickerProps {
    fn default() -> PickerProps {
        PickerProps {
            initial_value: None,
            placeholder: "انتخاب تاریخ".to_owned(),
            disabled: false,
        }
    }
}

pub type ChangeCallback = Box<dyn Fn(&DateChangeEvent)>;

/// A mounted picker widget.
///
/// Dropping it releases the outside-press subscription, so a dismissal
/// signal can never reach an unmounted picker.
pub struct DatePicker {
    picker: Rc<RefCell<Picker>>,
    placeholder: String,
    on_change: ChangeCallback,
    _outside_press: Subscription,
}

impl DatePicker {
    pub fn mount(
        props: PickerProps,
        dispatcher: &Dispatcher,
        clock: Box<dyn Clock>,
        formatter: Box<dyn Formatter>,
        on_change: ChangeCallback,
    ) -> DatePicker {
        let mut picker = Picker::new(clock, formatter);
        if let Some(initial) = &props.initial_value {
            picker.reset_value(initial);
        }
        picker.set_disabled(props.disabled);

        let picker = Rc::new(RefCell::new(picker));
        let outside_press = {
            let picker = Rc::clone(&picker);
            dispatcher.subscribe(move |hit| {
                if hit == PointerHit::Outside {
                    picker.borrow_mut().dismiss();
                }
            })
        };

        DatePicker {
            picker,
            placeholder: props.placeholder,
            on_change,
            _outside_press: outside_press,
        }
    }

    /// Re-initializes the selection the same way mounting does, for hosts
    /// that change the supplied value after mount. Emits nothing.
    pub fn set_value(&self, value: &str) {
        self.picker.borrow_mut().reset_value(value);
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.picker.borrow_mut().set_disabled(disabled);
    }

    pub fn toggle_open(&self) {
        self.picker.borrow_mut().toggle_open();
    }

    pub fn select_date(&self, date: NaiveDate) {
        let event = self.picker.borrow_mut().select_date(date);
        if let Some(event) = event {
            (self.on_change)(&event);
        }
    }

    pub fn navigate_month(&self, delta: i32) {
        self.picker.borrow_mut().navigate_month(delta);
    }

    pub fn jump_to_today(&self) {
        let event = self.picker.borrow_mut().jump_to_today();
        if let Some(event) = event {
            (self.on_change)(&event);
        }
    }

    /// Text for the collapsed field: the selected Persian date, or the
    /// placeholder while nothing is selected.
    pub fn display_text(&self) -> String {
        match self.picker.borrow().selected() {
            selected @ Some(_) => jalali::gregorian_to_persian_text(selected),
            None => self.placeholder.clone(),
        }
    }

    /// Header label of the visible page: month name and year numerals.
    pub fn header_label(&self) -> String {
        let picker = self.picker.borrow();
        format!("{} {}", picker.month_label(), picker.year_label())
    }

    /// Cells of the visible month page, for the rendering collaborator.
    pub fn month_cells(&self) -> Vec<DayCell> {
        self.picker.borrow_mut().grid().to_vec()
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.picker.borrow().selected()
    }

    pub fn displayed_month(&self) -> NaiveDate {
        self.picker.borrow().displayed_month()
    }

    pub fn is_open(&self) -> bool {
        self.picker.borrow().is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::JalaliFormatter;

    struct FixedClock(NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    fn greg(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn mounted(
        props: PickerProps,
        dispatcher: &Dispatcher,
        today: NaiveDate,
    ) -> (DatePicker, Rc<RefCell<Vec<DateChangeEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let widget = DatePicker::mount(
            props,
            dispatcher,
            Box::new(FixedClock(today)),
            Box::new(JalaliFormatter),
            Box::new(move |event| sink.borrow_mut().push(event.clone())),
        );
        (widget, events)
    }

    #[test]
    fn mounting_with_initial_value_does_not_emit() {
        let dispatcher = Dispatcher::new();
        let props = PickerProps::new(Some("۱۴۰۳/۰۱/۰۱".to_owned()), "تاریخ".to_owned(), false);
        let (widget, events) = mounted(props, &dispatcher, greg(2024, 3, 20));

        assert_eq!(widget.selected(), Some(greg(2024, 1, 1)));
        assert_eq!(widget.displayed_month(), greg(2024, 1, 1));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn empty_initial_value_and_today_jump() {
        let dispatcher = Dispatcher::new();
        let (widget, events) = mounted(PickerProps::default(), &dispatcher, greg(2024, 3, 20));
        assert_eq!(widget.selected(), None);

        widget.toggle_open();
        widget.jump_to_today();

        assert!(!widget.is_open());
        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].gregorian, greg(2024, 3, 20));
        assert_eq!(events[0].persian_text, "۱۴۰۳/۰۱/۰۱");
    }

    #[test]
    fn selection_emits_exactly_once() {
        let dispatcher = Dispatcher::new();
        let (widget, events) = mounted(PickerProps::default(), &dispatcher, greg(2024, 3, 20));

        widget.select_date(greg(2024, 4, 2));

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].gregorian, greg(2024, 4, 2));
        assert_eq!(events[0].year_label, "۱۴۰۳");
    }

    #[test]
    fn disabled_widget_never_emits() {
        let dispatcher = Dispatcher::new();
        let props = PickerProps::new(None, "تاریخ".to_owned(), true);
        let (widget, events) = mounted(props, &dispatcher, greg(2024, 3, 20));

        widget.toggle_open();
        widget.select_date(greg(2024, 4, 2));
        widget.jump_to_today();

        assert!(!widget.is_open());
        assert_eq!(widget.selected(), None);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn outside_press_closes_without_touching_selection() {
        let dispatcher = Dispatcher::new();
        let (widget, events) = mounted(PickerProps::default(), &dispatcher, greg(2024, 3, 20));

        widget.select_date(greg(2024, 3, 25));
        widget.toggle_open();
        dispatcher.pointer_pressed(PointerHit::Inside);
        assert!(widget.is_open());

        dispatcher.pointer_pressed(PointerHit::Outside);
        assert!(!widget.is_open());
        assert_eq!(widget.selected(), Some(greg(2024, 3, 25)));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn unmounting_releases_the_subscription() {
        let dispatcher = Dispatcher::new();
        let (widget, _events) = mounted(PickerProps::default(), &dispatcher, greg(2024, 3, 20));
        assert_eq!(dispatcher.listener_count(), 1);

        drop(widget);
        assert_eq!(dispatcher.listener_count(), 0);
    }

    #[test]
    fn set_value_follows_the_mount_rule() {
        let dispatcher = Dispatcher::new();
        let (widget, events) = mounted(PickerProps::default(), &dispatcher, greg(2024, 3, 20));

        widget.set_value("۱۴۰۳/۱۱/۰۸");
        assert_eq!(widget.selected(), Some(greg(2024, 11, 8)));
        assert!(events.borrow().is_empty());

        widget.set_value("");
        assert_eq!(widget.selected(), None);
        assert_eq!(widget.displayed_month(), greg(2024, 3, 20));
    }

    #[test]
    fn display_text_falls_back_to_placeholder() {
        let dispatcher = Dispatcher::new();
        let props = PickerProps::new(None, "انتخاب تاریخ".to_owned(), false);
        let (widget, _events) = mounted(props, &dispatcher, greg(2024, 3, 20));

        assert_eq!(widget.display_text(), "انتخاب تاریخ");
        widget.select_date(greg(2024, 3, 20));
        assert_eq!(widget.display_text(), "۱۴۰۳/۰۱/۰۱");
    }
}
