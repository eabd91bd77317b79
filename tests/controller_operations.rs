mod common;

use common::{session, PortEvent, ScriptedModel};
use life_session::{Cell, GridModel, LifeError, LifeGrid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_get_field_and_click() {
    let (mut session, _) = session(ScriptedModel::new(LifeGrid::new(2, 4)), 1.0);
    session.on_cell_click(1, 3).unwrap();

    let mut field = session.get_field();
    assert_eq!(field[3][1], Cell::Alive);

    field[0][0] = Cell::Alive;
    assert_eq!(session.get_field()[0][0], Cell::Dead);
}

#[test]
fn test_click_outside_field() {
    let (mut session, _) = session(ScriptedModel::new(LifeGrid::new(2, 2)), 1.0);
    assert!(matches!(
        session.on_cell_click(0, 2),
        Err(LifeError::OutOfBounds { x: 0, y: 2, .. })
    ));
    assert_eq!(session.model().population(), 0);
}

#[test]
fn test_change_size_pushes_dimensions_then_field() {
    let model = ScriptedModel::new(LifeGrid::with_alive(3, 3, &[(2, 2), (0, 0)]));
    let (mut session, _) = session(model, 1.0);
    session.change_size(2, 5);

    let expected_field = vec![
        vec![Cell::Alive, Cell::Dead],
        vec![Cell::Dead; 2],
        vec![Cell::Dead; 2],
        vec![Cell::Dead; 2],
        vec![Cell::Dead; 2],
    ];
    assert_eq!(
        session.presenter().events,
        vec![PortEvent::Dimensions(2, 5), PortEvent::Render(expected_field)]
    );
    assert_eq!(session.stats().current_population, 1);
}

#[test]
fn test_new_game_keeps_running_state() {
    let (mut session, _) = session(ScriptedModel::new(common::blinker()), 1.0);
    session.start();
    session.new_game();

    assert!(session.is_running());
    assert_eq!(session.model().population(), 0);
    assert_eq!(session.presenter().count(&PortEvent::ResetControls), 1);
}

#[test]
fn test_fill_randomly_uses_one_draw_per_cell_in_row_major_order() {
    let (session, _) = session(ScriptedModel::new(LifeGrid::new(5, 4)), 1.0);
    let mut session = session.with_seed(3);
    session.fill_randomly().unwrap();

    let mut rng = StdRng::seed_from_u64(3);
    let expected: Vec<Vec<Cell>> = (0..4)
        .map(|_| {
            (0..5)
                .map(|_| {
                    if rng.gen::<f64>() > 0.5 {
                        Cell::Alive
                    } else {
                        Cell::Dead
                    }
                })
                .collect()
        })
        .collect();

    assert_eq!(session.get_field(), expected);
    assert_eq!(session.presenter().events, vec![PortEvent::Render(expected)]);
}

#[test]
fn test_fill_randomly_keeps_live_cells() {
    let model = ScriptedModel::new(LifeGrid::with_alive(6, 6, &[(0, 0), (5, 5), (2, 3)]));
    let (session, _) = session(model, 1.0);
    let mut session = session.with_seed(11);

    session.fill_randomly().unwrap();
    let field = session.get_field();
    assert_eq!(field[0][0], Cell::Alive);
    assert_eq!(field[5][5], Cell::Alive);
    assert_eq!(field[3][2], Cell::Alive);
}

#[test]
fn test_operations_on_empty_field() {
    let (mut session, _) = session(ScriptedModel::new(LifeGrid::new(0, 0)), 1.0);
    session.fill_randomly().unwrap();
    session.new_game();
    assert!(session.step());
    assert_eq!(session.get_field(), Vec::<Vec<Cell>>::new());
    assert_eq!(session.presenter().finished(), 1);
}
