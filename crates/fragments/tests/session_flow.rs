use std::collections::HashSet;

use fragments::app::view::{
    Action, DraftEdit, ListSettings, Outcome, Screen, ViewController, ViewState,
};
use fragments::domain::model::FragmentId;

fn write(view: &mut ViewController, text: &str) {
    view.dispatch(Action::Edit(DraftEdit::Paste(text.to_string())))
        .expect("edit applies");
}

#[test]
fn documented_walkthrough() {
    let mut view = ViewController::new(ListSettings::default());
    assert!(view.store().is_empty());

    write(&mut view, "  hello world  ");
    let outcome = view.dispatch(Action::Submit).unwrap();
    assert!(matches!(outcome, Outcome::Added(_)));
    assert_eq!(view.store().len(), 1);
    assert_eq!(view.store().fragments()[0].text(), "hello world");

    write(&mut view, "   ");
    assert_eq!(view.dispatch(Action::Submit).unwrap(), Outcome::Rejected);
    assert_eq!(view.store().len(), 1);

    let id = view.store().fragments()[0].id();
    view.dispatch(Action::Select(id)).unwrap();
    let Screen::Detail(detail) = view.screen() else {
        panic!("expected detail view");
    };
    assert_eq!(detail.fragment.text(), "hello world");

    view.dispatch(Action::Back).unwrap();
    let Screen::List(list) = view.screen() else {
        panic!("expected list view");
    };
    assert_eq!(list.fragments.len(), 1);
    assert_eq!(list.draft, "   ");
}

#[test]
fn many_additions_keep_order_and_unique_ids() {
    let mut view = ViewController::new(ListSettings::default());
    for n in 0..200 {
        write(&mut view, &format!("fragment {n}"));
        view.dispatch(Action::Submit).unwrap();
    }

    let fragments = view.store().fragments();
    assert_eq!(fragments.len(), 200);
    for (n, fragment) in fragments.iter().enumerate() {
        assert_eq!(fragment.text(), format!("fragment {n}"));
    }
    let ids: HashSet<FragmentId> = fragments.iter().map(|fragment| fragment.id()).collect();
    assert_eq!(ids.len(), 200);
}

#[test]
fn select_back_round_trip_leaves_collection_unchanged() {
    let mut view = ViewController::new(ListSettings::default());
    for text in ["a", "b", "c"] {
        write(&mut view, text);
        view.dispatch(Action::Submit).unwrap();
    }
    let before = view.store().fragments().to_vec();

    for fragment in &before {
        view.dispatch(Action::Select(fragment.id())).unwrap();
        assert_eq!(view.state(), ViewState::Viewing(fragment.id()));
        view.dispatch(Action::Back).unwrap();
        assert_eq!(view.state(), ViewState::Listing);
    }
    assert_eq!(view.store().fragments(), before.as_slice());
}
