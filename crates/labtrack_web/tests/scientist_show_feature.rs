use labtrack_core::db::open_db_in_memory;
use labtrack_core::{
    AssociationService, Experiment, ExperimentRepository, Lab, LabRepository, Scientist,
    ScientistRepository, SqliteAssociationRepository, SqliteExperimentRepository,
    SqliteLabRepository, SqliteScientistRepository,
};
use labtrack_web::{App, Method, Request, Response};
use rusqlite::Connection;
use uuid::Uuid;

struct World {
    curie: Scientist,
    franky: Scientist,
    jekyll: Scientist,
    exp_1: Experiment,
    exp_2: Experiment,
    exp_3: Experiment,
}

fn build_world(conn: &Connection) -> World {
    let labs = SqliteLabRepository::new(conn);
    let nuclear = Lab::new("Nuclear Lab");
    let electric = Lab::new("Electric Lab");
    labs.create_lab(&nuclear).unwrap();
    labs.create_lab(&electric).unwrap();

    let scientists = SqliteScientistRepository::new(conn);
    let curie = Scientist::new(
        nuclear.id,
        "Marie Curie",
        "radioactivity",
        "University of Paris",
    );
    let franky = Scientist::new(
        nuclear.id,
        "Victor Frankenstein",
        "electrical-biology",
        "University of Ingolstadt",
    );
    let jekyll = Scientist::new(
        electric.id,
        "Dr. Jekyll or Mr. Hyde",
        "sleep deprivation",
        "University of London",
    );
    for scientist in [&curie, &franky, &jekyll] {
        scientists.create_scientist(scientist).unwrap();
    }

    let experiments = SqliteExperimentRepository::new(conn);
    let exp_1 = Experiment::new("Radio-waves", "understand them", 6);
    let exp_2 = Experiment::new("My Hand Hurts", "understand why", 14);
    let exp_3 = Experiment::new("Monster", "electic-life", 7);
    let exp_4 = Experiment::new("Reduced Sleep", "who am I?", 2);
    let exp_5 = Experiment::new("More Reduced Sleep", "who am I now?", 10);
    for experiment in [&exp_1, &exp_2, &exp_3, &exp_4, &exp_5] {
        experiments.create_experiment(experiment).unwrap();
    }

    let links = AssociationService::new(SqliteAssociationRepository::new(conn));
    for (scientist, experiment) in [
        (&curie, &exp_1),
        (&curie, &exp_2),
        (&franky, &exp_1),
        (&franky, &exp_3),
        (&jekyll, &exp_1),
        (&jekyll, &exp_3),
        (&jekyll, &exp_4),
        (&jekyll, &exp_5),
    ] {
        links.link(scientist.id, experiment.id).unwrap();
    }

    World {
        curie,
        franky,
        jekyll,
        exp_1,
        exp_2,
        exp_3,
    }
}

fn visit(app: &App<'_>, path: &str) -> Response {
    let response = app.handle(&Request::get(path));
    assert_eq!(response.status, 200, "GET {path} should render");
    response
}

/// Submits the `Remove` form found inside `#experiment-<id>` and follows the
/// redirect, like a browser would.
fn click_remove(app: &App<'_>, page: &Response, experiment: &Experiment) -> (Response, String) {
    let region = within(&page.body, &format!("experiment-{}", experiment.id));
    let action = attribute_after(region, "action=\"");
    let method = attribute_after(region, "name=\"_method\" value=\"");
    assert!(region.contains("<button type=\"submit\">Remove</button>"));

    let submitted = app.handle(&Request::post_form(
        action.as_str(),
        format!("_method={method}"),
    ));
    assert_eq!(submitted.status, 303);
    let location = submitted.header("Location").unwrap().to_string();
    (visit(app, &location), location)
}

fn within<'a>(body: &'a str, dom_id: &str) -> &'a str {
    let marker = format!("id=\"{dom_id}\"");
    let start = body
        .find(&marker)
        .unwrap_or_else(|| panic!("no element #{dom_id} on page"));
    let rest = &body[start..];
    &rest[..rest.find("</li>").unwrap()]
}

fn attribute_after(region: &str, prefix: &str) -> String {
    let start = region.find(prefix).unwrap() + prefix.len();
    let rest = &region[start..];
    rest[..rest.find('"').unwrap()].to_string()
}

#[test]
fn displays_scientist_name_specialty_and_university() {
    let conn = open_db_in_memory().unwrap();
    let world = build_world(&conn);
    let app = App::new(&conn);

    let page = visit(&app, &format!("/scientists/{}", world.curie.id));

    assert!(page.body.contains("Name: Marie Curie"));
    assert!(page.body.contains("Specialty: radioactivity"));
    assert!(page.body.contains("University: University of Paris"));
    assert!(!page.body.contains("Name: Victor Frankenstein"));
    assert!(!page.body.contains(&world.franky.specialty));
    assert!(!page.body.contains(&world.jekyll.university));
}

#[test]
fn displays_the_lab_where_the_scientist_works() {
    let conn = open_db_in_memory().unwrap();
    let world = build_world(&conn);
    SqliteLabRepository::new(&conn)
        .create_lab(&Lab::new("Art Lab"))
        .unwrap();
    let app = App::new(&conn);

    let page = visit(&app, &format!("/scientists/{}", world.curie.id));

    assert!(page.body.contains("Current Lab: Nuclear Lab"));
    assert!(!page.body.contains("Art Lab"));
    assert!(!page.body.contains("Electric Lab"));
}

#[test]
fn displays_only_this_scientists_experiments() {
    let conn = open_db_in_memory().unwrap();
    let world = build_world(&conn);
    let app = App::new(&conn);

    let page = visit(&app, &format!("/scientists/{}", world.curie.id));

    assert!(page.body.contains("Experiments:"));
    assert!(page.body.contains("Radio-waves"));
    assert!(page.body.contains("My Hand Hurts"));
    assert!(!page.body.contains(&world.exp_3.name));
    assert!(!page.body.contains("Reduced Sleep"));
}

#[test]
fn displays_a_remove_button_for_each_experiment() {
    let conn = open_db_in_memory().unwrap();
    let world = build_world(&conn);
    let app = App::new(&conn);

    let page = visit(&app, &format!("/scientists/{}", world.curie.id));

    for experiment in [&world.exp_1, &world.exp_2] {
        let region = within(&page.body, &format!("experiment-{}", experiment.id));
        assert!(region.contains(&experiment.name));
        assert!(region.contains(">Remove</button>"));
    }
}

#[test]
fn remove_deletes_the_link_and_returns_to_the_show_page() {
    let conn = open_db_in_memory().unwrap();
    let world = build_world(&conn);
    let app = App::new(&conn);

    let show_path = format!("/scientists/{}", world.curie.id);
    let page = visit(&app, &show_path);
    assert!(page.body.contains("Radio-waves"));
    assert!(page.body.contains("My Hand Hurts"));

    let (page, location) = click_remove(&app, &page, &world.exp_1);

    assert_eq!(location, show_path);
    assert!(page.body.contains("My Hand Hurts"));
    assert!(!page.body.contains("Radio-waves"));
}

#[test]
fn remove_does_not_affect_other_scientists_on_that_experiment() {
    let conn = open_db_in_memory().unwrap();
    let world = build_world(&conn);
    let app = App::new(&conn);

    let page = visit(&app, &format!("/scientists/{}", world.curie.id));
    click_remove(&app, &page, &world.exp_1);

    let franky_page = visit(&app, &format!("/scientists/{}", world.franky.id));
    assert!(franky_page.body.contains("Radio-waves"));
    assert!(franky_page.body.contains("Monster"));

    let jekyll_page = visit(&app, &format!("/scientists/{}", world.jekyll.id));
    assert!(jekyll_page.body.contains("Radio-waves"));
}

#[test]
fn unknown_scientist_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    build_world(&conn);
    let app = App::new(&conn);

    let response = app.handle(&Request::get(format!("/scientists/{}", Uuid::new_v4())));
    assert_eq!(response.status, 404);

    let response = app.handle(&Request::get("/scientists/not-an-id"));
    assert_eq!(response.status, 404);
}

#[test]
fn removing_an_already_removed_link_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let world = build_world(&conn);
    let app = App::new(&conn);

    let path = format!(
        "/scientists/{}/experiments/{}",
        world.curie.id, world.exp_1.id
    );
    let first = app.handle(&Request::new(Method::Delete, path.as_str(), ""));
    assert_eq!(first.status, 303);

    let second = app.handle(&Request::post_form(path.as_str(), "_method=delete"));
    assert_eq!(second.status, 404);
    assert!(second.header("Location").is_none());
}

#[test]
fn removing_a_link_of_another_scientist_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let world = build_world(&conn);
    let app = App::new(&conn);

    let path = format!(
        "/scientists/{}/experiments/{}",
        world.curie.id, world.exp_3.id
    );
    let response = app.handle(&Request::post_form(path.as_str(), "_method=delete"));
    assert_eq!(response.status, 404);

    let franky_page = visit(&app, &format!("/scientists/{}", world.franky.id));
    assert!(franky_page.body.contains("Monster"));
}

#[test]
fn wrong_method_is_rejected_with_allow_header() {
    let conn = open_db_in_memory().unwrap();
    let world = build_world(&conn);
    let app = App::new(&conn);

    let path = format!(
        "/scientists/{}/experiments/{}",
        world.curie.id, world.exp_1.id
    );
    let response = app.handle(&Request::get(path.as_str()));
    assert_eq!(response.status, 405);
    assert_eq!(response.header("Allow"), Some("DELETE"));

    let page = visit(&app, &format!("/scientists/{}", world.curie.id));
    assert!(page.body.contains("Radio-waves"));
}

#[test]
fn head_request_answers_like_get() {
    let conn = open_db_in_memory().unwrap();
    let world = build_world(&conn);
    let app = App::new(&conn);

    let path = format!("/scientists/{}", world.curie.id);
    let response = app.handle(&Request::new(Method::Head, path.as_str(), ""));
    assert_eq!(response.status, 200);
    assert!(response
        .header("Content-Type")
        .is_some_and(|value| value.starts_with("text/html")));

    let missing = app.handle(&Request::new(
        Method::Head,
        format!("/scientists/{}", Uuid::new_v4()),
        "",
    ));
    assert_eq!(missing.status, 404);
}

#[test]
fn corrupt_store_renders_error_page_without_details() {
    let conn = open_db_in_memory().unwrap();
    let world = build_world(&conn);
    conn.execute(
        "UPDATE labs SET name = '' WHERE id = ?1;",
        [world.curie.lab_id.to_string()],
    )
    .unwrap();
    let app = App::new(&conn);

    let response = app.handle(&Request::get(format!("/scientists/{}", world.curie.id)));
    assert_eq!(response.status, 500);
    assert!(response.body.contains("Something went wrong"));
    for leaked in [
        "invalid",
        "labs row",
        world.curie.lab_id.to_string().as_str(),
        "Marie Curie",
    ] {
        assert!(!response.body.contains(leaked), "500 page leaks `{leaked}`");
    }

    let unaffected = visit(&app, &format!("/scientists/{}", world.jekyll.id));
    assert!(unaffected.body.contains("Current Lab: Electric Lab"));
}
