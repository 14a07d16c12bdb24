//! Scientist show page.
//!
//! # Content contract
//! - `Name:`, `Specialty:`, `University:` and `Current Lab:` lines carry the
//!   scientist's own values only.
//! - An `Experiments:` heading lists every linked experiment name.
//! - Each experiment sits in `#experiment-<id>` together with a `Remove`
//!   button that deletes that one link.

use super::{escape_html, layout};
use crate::routes::{scientist_experiment_path, METHOD_OVERRIDE_FIELD};
use labtrack_core::{Experiment, ScientistDetail, ScientistId};
use std::fmt::Write;

/// DOM id of the region holding one experiment on the show page.
pub fn experiment_dom_id(experiment: &Experiment) -> String {
    format!("experiment-{}", experiment.id)
}

pub fn render(detail: &ScientistDetail) -> String {
    let scientist = &detail.scientist;
    let mut main = String::new();

    let _ = writeln!(main, "<h1>{}</h1>", escape_html(&scientist.name));
    let _ = writeln!(main, "<section class=\"scientist\">");
    let _ = writeln!(main, "<p>Name: {}</p>", escape_html(&scientist.name));
    let _ = writeln!(
        main,
        "<p>Specialty: {}</p>",
        escape_html(&scientist.specialty)
    );
    let _ = writeln!(
        main,
        "<p>University: {}</p>",
        escape_html(&scientist.university)
    );
    let _ = writeln!(main, "<p>Current Lab: {}</p>", escape_html(&detail.lab.name));
    let _ = writeln!(main, "</section>");

    let _ = writeln!(main, "<section class=\"experiments\">");
    let _ = writeln!(main, "<h2>Experiments:</h2>");
    if detail.experiments.is_empty() {
        let _ = writeln!(main, "<p>No experiments yet.</p>");
    } else {
        let _ = writeln!(main, "<ul>");
        for experiment in &detail.experiments {
            render_experiment(&mut main, scientist.id, experiment);
        }
        let _ = writeln!(main, "</ul>");
    }
    let _ = writeln!(main, "</section>");

    layout(&scientist.name, &main)
}

fn render_experiment(out: &mut String, scientist_id: ScientistId, experiment: &Experiment) {
    let _ = writeln!(out, "<li id=\"{}\">", experiment_dom_id(experiment));
    let _ = writeln!(
        out,
        "<span class=\"experiment-name\">{}</span>",
        escape_html(&experiment.name)
    );
    let _ = writeln!(
        out,
        "<form method=\"post\" action=\"{}\">",
        scientist_experiment_path(scientist_id, experiment.id)
    );
    let _ = writeln!(
        out,
        "<input type=\"hidden\" name=\"{METHOD_OVERRIDE_FIELD}\" value=\"delete\">"
    );
    let _ = writeln!(out, "<button type=\"submit\">Remove</button>");
    let _ = writeln!(out, "</form>");
    let _ = writeln!(out, "</li>");
}

#[cfg(test)]
mod tests {
    use super::render;
    use labtrack_core::{Experiment, Lab, Scientist, ScientistDetail};

    fn detail(experiments: Vec<Experiment>) -> ScientistDetail {
        let lab = Lab::new("Nuclear Lab");
        ScientistDetail {
            scientist: Scientist::new(lab.id, "Marie Curie", "radioactivity", "University of Paris"),
            lab,
            experiments,
        }
    }

    #[test]
    fn renders_labelled_fields() {
        let page = render(&detail(Vec::new()));

        assert!(page.contains("Name: Marie Curie"));
        assert!(page.contains("Specialty: radioactivity"));
        assert!(page.contains("University: University of Paris"));
        assert!(page.contains("Current Lab: Nuclear Lab"));
        assert!(page.contains("Experiments:"));
        assert!(page.contains("No experiments yet."));
    }

    #[test]
    fn each_experiment_gets_scoped_remove_form() {
        let radio = Experiment::new("Radio-waves", "understand them", 6);
        let page = render(&detail(vec![radio.clone()]));

        let marker = format!("<li id=\"experiment-{}\">", radio.id);
        let start = page.find(&marker).expect("experiment region should render");
        let region = &page[start..];
        let region = &region[..region.find("</li>").expect("region should close")];

        assert!(region.contains("Radio-waves"));
        assert!(region.contains("<button type=\"submit\">Remove</button>"));
        assert!(region.contains(&format!("/experiments/{}\"", radio.id)));
        assert!(region.contains("name=\"_method\" value=\"delete\""));
    }

    #[test]
    fn escapes_record_text() {
        let page = render(&detail(vec![Experiment::new("<Monster>", "", 7)]));

        assert!(page.contains("&lt;Monster&gt;"));
        assert!(!page.contains("<Monster>"));
    }
}
