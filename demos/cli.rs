use anyhow::{Context, Result};
use std::env;
use tableau_server_client::endpoints::{Listable, TableauAuth};
use tableau_server_client::request_options::{Direction, Field, RequestOptions, Sort};
use tableau_server_client::session::SessionFile;
use tableau_server_client::{Pager, Server};

fn main() -> Result<()> {
    env_logger::init();

    let address = env::var("TABLEAU_SERVER")?;
    let site = env::var("TABLEAU_SITE").unwrap_or_default();
    let session_path = SessionFile::default_path().context("No home directory for the session file")?;

    let mut server = Server::builder().address(&address).build()?;
    let resumed = SessionFile::load(&session_path)
        .ok()
        .filter(|file| file.base_url.as_deref() == Some(address.as_str()))
        .and_then(|file| file.context().ok());

    match resumed {
        Some(context) => {
            println!("resuming session for site {}", context.site_id);
            server.set_session(Some(context));
        }
        None => {
            let username = env::var("TABLEAU_USERNAME")?;
            let auth = TableauAuth::new(&username, env::var("TABLEAU_PASSWORD")?, &site);
            let context = server.sign_in(&auth)?;
            SessionFile::signed_in(username, &server, &context, &site).save(&session_path)?;
        }
    }

    let mut options = RequestOptions::with_page(1, 50)?;
    options.add_sort(Sort::new(Field::Name, Direction::Asc));
    let (projects, pagination) = server.projects().list(Some(&options))?;
    println!("{} of {} projects", projects.len(), pagination.total_available);
    for project in projects {
        println!("project: {}, permissions: {:?}", project.name(), project.content_permissions);
    }

    for datasource in Pager::new(server.datasources(), Some(options)) {
        let datasource = datasource?;
        println!(
            "datasource: {:?}, size: {}, certified: {:?}",
            datasource.name(),
            datasource.calculate_size(),
            datasource.certified()
        );
    }

    if env::var("TABLEAU_SIGN_OUT").is_ok() {
        server.sign_out()?;
        SessionFile::signed_out().save(&session_path)?;
        println!("signed out");
    }

    Ok(())
}
