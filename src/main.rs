use std::io::{self, Read, Write};
use std::{fs, process::ExitCode};

use ariadne::{Color, Label, Report, ReportKind, Source};
use keiro::{
    error::SceneError,
    renderer::{Renderer, SVGRenderer},
    scene::Scene,
};
use log::{error, info};

fn main() -> ExitCode {
    env_logger::init();

    let mut renderer = SVGRenderer::new();
    let mut path = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--grid" => renderer.show_grid_lines = true,
            "--graph" => renderer.show_graph = true,
            _ => path = Some(arg),
        }
    }

    // Read the contents of a specified file or from stdio.
    let src = match read_source(path.as_deref()) {
        Ok(src) => src,
        Err(err) => {
            error!("cannot read scene: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let scene = match Scene::parse(&src) {
        Ok(scene) => scene,
        Err(SceneError::Syntax(errors)) => {
            for e in errors {
                let report = Report::build(ReportKind::Error, (), e.span().start)
                    .with_message(e.to_string())
                    .with_label(
                        Label::new(e.span())
                            .with_message(match e.found() {
                                Some(c) => format!("unexpected `{}`", c),
                                None => "unexpected end of input".to_string(),
                            })
                            .with_color(Color::Red),
                    )
                    .finish();

                if let Err(err) = report.eprint(Source::from(&src)) {
                    error!("cannot print report: {}", err);
                }
            }
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let route = match scene.route() {
        Ok(route) => route,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    info!("route: {} ({} points)", route.status, route.path.len());

    let stdout = io::stdout();
    let mut writer = stdout.lock();

    if let Err(err) = renderer
        .render(&scene, &route, &mut writer)
        .and_then(|_| writer.write_all(b"\n").map_err(Into::into))
    {
        error!("cannot write SVG: {}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn read_source(path: Option<&str>) -> io::Result<String> {
    if let Some(path) = path {
        return fs::read_to_string(path);
    }

    let mut s = String::new();
    io::stdin().read_to_string(&mut s)?;
    Ok(s)
}
