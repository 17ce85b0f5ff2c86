mod utils;

use chrono::{NaiveTime, Weekday};
use std::collections::HashSet;
use tableau_server_client::Server;
use tableau_server_client::endpoints::{Listable, TableauAuth};
use tableau_server_client::entities::{
    AdminMode, ContentPermissions, ExecutionOrder, GroupItem, IntervalItem, ProjectItem,
    RefreshType, ScheduleItem, ScheduleState, ScheduleType, SiteItem, SiteRole, SiteState,
    TaskTarget, UserItem,
};
use tableau_server_client::error::TscError;
use tableau_server_client::request_options::{
    Direction, Field, Filter, FilterValue, ImageRequestOptions, Operator, RequestOptions, Sort,
};
use tableau_server_client::transport::HttpMethod;
use utils::{
    ADDRESS, RecordingTransport, SITE_URL, TOKEN, body_from_file, ns_body, query_value,
    signed_in_server, xml_attr_of,
};

#[test]
fn test_sign_in_installs_session() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/signin.xml");
    let mut server = Server::builder()
        .address(ADDRESS)
        .transport(transport.clone())
        .build()
        .unwrap();

    let auth = TableauAuth::new("admin", "s3cret&<", "marketing");
    let session = server.sign_in(&auth).unwrap();

    assert_eq!(TOKEN, session.auth_token);
    assert_eq!("site-id", session.site_id);
    assert_eq!("user-id", session.user_id);
    assert!(server.is_signed_in());
    assert_eq!(SITE_URL, server.site_url().unwrap());

    let request = transport.last_request();
    assert_eq!(HttpMethod::Post, request.method);
    assert_eq!("http://tableau.test/api/2.5/auth/signin", request.url);
    assert_eq!(None, request.header("X-Tableau-Auth"));
    let body = request.body.unwrap();
    assert_eq!(Some("admin".to_string()), xml_attr_of(&body, "credentials", "name"));
    assert_eq!(Some("s3cret&<".to_string()), xml_attr_of(&body, "credentials", "password"));
    assert_eq!(Some("marketing".to_string()), xml_attr_of(&body, "site", "contentUrl"));
}

#[test]
fn test_rejected_sign_in_keeps_client_signed_out() {
    let transport = RecordingTransport::default();
    transport.respond(401, body_from_file("test-files/error_401.xml"));
    let mut server = Server::builder()
        .address(ADDRESS)
        .transport(transport.clone())
        .build()
        .unwrap();

    let error = server
        .sign_in(&TableauAuth::new("admin", "wrong", ""))
        .unwrap_err();
    match error {
        TscError::ServerResponse { status, code, .. } => {
            assert_eq!(401, status);
            assert_eq!("401001", code);
        }
        other => panic!("Expected ServerResponse, got {other:?}"),
    }
    assert!(!server.is_signed_in());
}

#[test]
fn test_sign_out_clears_session() {
    let transport = RecordingTransport::default();
    transport.respond_empty();
    let mut server = signed_in_server(&transport);

    server.sign_out().unwrap();

    assert!(!server.is_signed_in());
    let request = transport.last_request();
    assert_eq!("http://tableau.test/api/2.5/auth/signout", request.url);
    assert_eq!(Some(TOKEN), request.header("X-Tableau-Auth"));
    assert!(matches!(server.sign_out(), Err(TscError::NotSignedIn)));
}

#[test]
fn test_site_scoped_calls_need_a_session() {
    let transport = RecordingTransport::default();
    let server = Server::builder()
        .address(ADDRESS)
        .transport(transport.clone())
        .build()
        .unwrap();

    assert!(matches!(server.datasources().list(None), Err(TscError::NotSignedIn)));
    assert!(matches!(server.schedules().list(None), Err(TscError::NotSignedIn)));
    assert!(transport.requests().is_empty());
}

#[test]
fn test_list_datasources() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/datasources.xml");
    let server = signed_in_server(&transport);

    let (datasources, pagination) = server.datasources().list(None).unwrap();

    assert_eq!(2, pagination.total_available);
    assert_eq!(2, datasources.len());
    let first = &datasources[0];
    assert_eq!(Some("e76a1461-3b1d-4588-bf1b-17551a879ad9"), first.id());
    assert_eq!(Some("SampleDS"), first.name());
    assert_eq!(Some("dataengine"), first.datasource_type());
    assert_eq!("ee8c6e70-43b6-11e6-af4f-f7b0d8e20760", first.project_id());
    assert_eq!(Some("default"), first.project_name());
    assert_eq!(Some(true), first.certified());
    assert_eq!(Some("Reviewed by finance"), first.certification_note());
    let expected: HashSet<String> = ["world", "indicators"].iter().map(|s| s.to_string()).collect();
    assert_eq!(&expected, first.tags());

    let second = &datasources[1];
    assert_eq!(Some(false), second.certified());
    assert_eq!(None, second.certification_note());
    assert!(second.tags().is_empty());

    let request = transport.last_request();
    assert_eq!(HttpMethod::Get, request.method);
    assert_eq!(format!("{SITE_URL}/datasources"), request.url);
    assert_eq!(Some(TOKEN), request.header("X-Tableau-Auth"));
}

#[test]
fn test_list_sends_filters_and_sorts() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/datasources.xml");
    let server = signed_in_server(&transport);

    let mut options = RequestOptions::with_page(2, 25).unwrap();
    options
        .add_filter(Filter::equals(Field::Name, "Superstore"))
        .add_filter(
            Filter::new(
                Field::Tags,
                Operator::In,
                FilterValue::Many(vec!["a".to_string(), "b".to_string()]),
            )
            .unwrap(),
        )
        .add_sort(Sort::new(Field::UpdatedAt, Direction::Desc));
    server.datasources().list(Some(&options)).unwrap();

    let request = transport.last_request();
    assert_eq!(Some("2"), query_value(&request, "pageNumber"));
    assert_eq!(Some("25"), query_value(&request, "pageSize"));
    assert_eq!(Some("name:eq:Superstore,tags:in:[a,b]"), query_value(&request, "filter"));
    assert_eq!(Some("updatedAt:desc"), query_value(&request, "sort"));
}

#[test]
fn test_get_datasource_by_id() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/datasource_get.xml");
    let server = signed_in_server(&transport);

    let datasource = server
        .datasources()
        .get_by_id("9dbd2263-16b5-46e1-9c43-a76bb8ab65fb")
        .unwrap();

    assert_eq!(Some("Sample datasource"), datasource.name());
    assert_eq!(Some("5de011f8-5aa9-4d5b-b991-f462c8dd6bb7"), datasource.owner_id());
    assert_eq!(3, datasource.tags().len());
    assert_eq!(
        format!("{SITE_URL}/datasources/9dbd2263-16b5-46e1-9c43-a76bb8ab65fb"),
        transport.last_request().url
    );
}

#[test]
fn test_get_by_empty_id_sends_nothing() {
    let transport = RecordingTransport::default();
    let server = signed_in_server(&transport);

    assert!(matches!(server.datasources().get_by_id(""), Err(TscError::Validation(_))));
    assert!(matches!(server.workbooks().delete(""), Err(TscError::Validation(_))));
    assert!(transport.requests().is_empty());
}

#[test]
fn test_missing_datasource_is_not_found() {
    let transport = RecordingTransport::default();
    transport.respond(404, body_from_file("test-files/error_404.xml"));
    let server = signed_in_server(&transport);

    match server.datasources().get_by_id("missing") {
        Err(TscError::NotFound { code, summary, detail }) => {
            assert_eq!("404004", code);
            assert_eq!("Resource Not Found", summary);
            assert_eq!("Datasource 'missing' could not be found.", detail);
        }
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_update_datasource_sends_tag_diff_then_fields() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/datasource_get.xml");
    let server = signed_in_server(&transport);
    let mut datasource = server
        .datasources()
        .get_by_id("9dbd2263-16b5-46e1-9c43-a76bb8ab65fb")
        .unwrap();

    let mut tags = datasource.tags().clone();
    tags.remove("sample");
    tags.insert("finance".to_string());
    datasource.set_tags(tags);
    datasource.set_name("Renamed").unwrap();
    datasource.set_certified(true);
    datasource.set_certification_note(Some("Verified".into()));

    transport
        .respond(200, ns_body(r#"<tags><tag label="finance"/></tags>"#))
        .respond_empty()
        .respond_with_file("test-files/datasource_update.xml");
    server.datasources().update(&mut datasource).unwrap();

    let item_url = format!("{SITE_URL}/datasources/9dbd2263-16b5-46e1-9c43-a76bb8ab65fb");
    let requests = transport.requests();
    assert_eq!(4, requests.len());

    assert_eq!(HttpMethod::Put, requests[1].method);
    assert_eq!(format!("{item_url}/tags"), requests[1].url);
    let tags_body = requests[1].body.clone().unwrap();
    assert_eq!(Some("finance".to_string()), xml_attr_of(&tags_body, "tag", "label"));

    assert_eq!(HttpMethod::Delete, requests[2].method);
    assert_eq!(format!("{item_url}/tags/sample"), requests[2].url);

    assert_eq!(HttpMethod::Put, requests[3].method);
    assert_eq!(item_url, requests[3].url);
    let body = requests[3].body.clone().unwrap();
    assert_eq!(Some("Renamed".to_string()), xml_attr_of(&body, "datasource", "name"));
    assert_eq!(Some("true".to_string()), xml_attr_of(&body, "datasource", "isCertified"));
    assert_eq!(
        Some("ee8c6e70-43b6-11e6-af4f-f7b0d8e20760".to_string()),
        xml_attr_of(&body, "project", "id")
    );

    assert_eq!(Some("Renamed"), datasource.name());
    assert_eq!(Some("Verified"), datasource.certification_note());
    assert_eq!("d1b2c3d4-0000-0000-0000-000000000000", datasource.project_id());
    assert_eq!(Some("dd2239f6-ddf1-4107-981a-4cf94e415794"), datasource.owner_id());
}

#[test]
fn test_removed_tag_label_is_escaped_in_url() {
    let transport = RecordingTransport::default();
    transport.respond(
        200,
        ns_body(
            r#"<datasource id="d1" name="Sales"><project id="p1"/><tags><tag label="q4 plan/draft"/></tags></datasource>"#,
        ),
    );
    let server = signed_in_server(&transport);
    let mut datasource = server.datasources().get_by_id("d1").unwrap();

    datasource.set_tags(HashSet::new());
    transport
        .respond_empty()
        .respond(200, ns_body(r#"<datasource id="d1" name="Sales"><project id="p1"/></datasource>"#));
    server.datasources().update(&mut datasource).unwrap();

    let requests = transport.requests();
    assert_eq!(3, requests.len());
    assert_eq!(HttpMethod::Delete, requests[1].method);
    assert_eq!(
        format!("{SITE_URL}/datasources/d1/tags/q4%20plan%2Fdraft"),
        requests[1].url
    );
}

#[test]
fn test_update_without_tag_changes_is_one_call() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/datasource_get.xml");
    let server = signed_in_server(&transport);
    let mut datasource = server
        .datasources()
        .get_by_id("9dbd2263-16b5-46e1-9c43-a76bb8ab65fb")
        .unwrap();

    transport.respond_with_file("test-files/datasource_update.xml");
    server.datasources().update(&mut datasource).unwrap();

    assert_eq!(2, transport.requests().len());
    assert_eq!(HttpMethod::Put, transport.last_request().method);
}

#[test]
fn test_populate_and_update_connections() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/datasource_get.xml");
    let server = signed_in_server(&transport);
    let mut datasource = server
        .datasources()
        .get_by_id("9dbd2263-16b5-46e1-9c43-a76bb8ab65fb")
        .unwrap();
    assert!(matches!(datasource.connections(), Err(TscError::UnpopulatedProperty(_))));

    transport.respond_with_file("test-files/datasource_connections.xml");
    server.datasources().populate_connections(&mut datasource).unwrap();
    let connections = datasource.connections().unwrap();
    assert_eq!(2, connections.len());
    assert_eq!(Some("forty-two.example.com"), connections[0].server_address.as_deref());
    assert_eq!(Some("Sample datasource"), connections[0].datasource_name());
    assert_eq!(Some(true), connections[1].embed_password);

    let mut connection = connections[0].clone();
    connection.server_address = Some("bar.example.com".into());
    connection.server_port = Some("9876".into());
    connection.username = Some("foo".into());
    connection.embed_password = Some(false);

    transport.respond_with_file("test-files/connection_update.xml");
    let updated = server
        .datasources()
        .update_connection(&datasource, &connection)
        .unwrap();

    let request = transport.last_request();
    assert_eq!(
        format!(
            "{SITE_URL}/datasources/9dbd2263-16b5-46e1-9c43-a76bb8ab65fb/connections/be786ae0-d2bf-4a4b-9b34-e2de8d2d4488"
        ),
        request.url
    );
    let body = request.body.unwrap();
    assert_eq!(Some("9876".to_string()), xml_attr_of(&body, "connection", "serverPort"));
    assert_eq!(Some("false".to_string()), xml_attr_of(&body, "connection", "embedPassword"));
    assert_eq!(Some("bar.example.com"), updated.server_address.as_deref());
    assert_eq!(Some("foo"), updated.username.as_deref());
}

#[test]
fn test_delete_datasource() {
    let transport = RecordingTransport::default();
    transport.respond_empty();
    let server = signed_in_server(&transport);

    server.datasources().delete("abc").unwrap();

    let request = transport.last_request();
    assert_eq!(HttpMethod::Delete, request.method);
    assert_eq!(format!("{SITE_URL}/datasources/abc"), request.url);
}

#[test]
fn test_projects() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/projects.xml");
    let server = signed_in_server(&transport);

    let (projects, _) = server.projects().list(None).unwrap();
    assert_eq!(2, projects.len());
    assert_eq!("default", projects[0].name());
    assert_eq!(Some(ContentPermissions::ManagedByOwner), projects[0].content_permissions);
    assert_eq!(Some("ee8c6e70-43b6-11e6-af4f-f7b0d8e20760"), projects[1].parent_id.as_deref());

    let mut project =
        ProjectItem::new("Test Project", Some("Project created for testing".into())).unwrap();
    project.content_permissions = Some(ContentPermissions::ManagedByOwner);
    transport.respond(201, body_from_file("test-files/project_create.xml"));
    let created = server.projects().create(&project).unwrap();
    assert_eq!(Some("ccbea03f-77c4-4209-8774-f67bc59c3cef"), created.id());
    let request = transport.last_request();
    assert_eq!(format!("{SITE_URL}/projects"), request.url);
    assert_eq!(
        Some("ManagedByOwner".to_string()),
        xml_attr_of(&request.body.unwrap(), "project", "contentPermissions")
    );

    let mut created = created;
    created.set_name("Renamed Project").unwrap();
    transport.respond(
        200,
        ns_body(
            r#"<project id="ccbea03f-77c4-4209-8774-f67bc59c3cef" name="Renamed Project" contentPermissions="LockedToProject"/>"#,
        ),
    );
    server.projects().update(&mut created).unwrap();
    assert_eq!(Some(ContentPermissions::LockedToProject), created.content_permissions);
    assert_eq!(Some("Project created for testing"), created.description.as_deref());
    assert_eq!(HttpMethod::Put, transport.last_request().method);

    transport.respond_empty();
    server.projects().delete("ccbea03f-77c4-4209-8774-f67bc59c3cef").unwrap();
    assert_eq!(
        format!("{SITE_URL}/projects/ccbea03f-77c4-4209-8774-f67bc59c3cef"),
        transport.last_request().url
    );
}

#[test]
fn test_update_unsaved_project_fails() {
    let transport = RecordingTransport::default();
    let server = signed_in_server(&transport);
    let mut project = ProjectItem::new("Draft", None).unwrap();

    assert!(matches!(server.projects().update(&mut project), Err(TscError::Validation(_))));
    assert!(transport.requests().is_empty());
}

#[test]
fn test_users() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/users.xml");
    let server = signed_in_server(&transport);

    let (users, _) = server.users().list(None).unwrap();
    assert_eq!(2, users.len());
    assert_eq!("alice", users[0].name());
    assert_eq!(Some(SiteRole::Publisher), users[0].site_role());
    assert_eq!(Some("local"), users[0].domain_name());
    assert!(users[0].last_login().is_some());

    let mut user = users[0].clone();
    assert!(matches!(user.workbooks(), Err(TscError::UnpopulatedProperty(_))));
    transport.respond_with_file("test-files/user_workbooks.xml");
    let pagination = server.users().populate_workbooks(&mut user, None).unwrap();
    assert_eq!(1, pagination.total_available);
    let workbooks = user.workbooks().unwrap();
    assert_eq!(Some("SafariSample"), workbooks[0].name());
    assert_eq!(
        format!("{SITE_URL}/users/dd2239f6-ddf1-4107-981a-4cf94e415794/workbooks"),
        transport.last_request().url
    );

    let new_user = UserItem::new("charlie", SiteRole::Viewer).unwrap();
    transport.respond(201, body_from_file("test-files/group_add_user.xml"));
    let added = server.users().add(&new_user).unwrap();
    assert_eq!(Some("5de011f8-5aa9-4d5b-b991-f462c8dd6bb7"), added.id());
    let body = transport.last_request().body.unwrap();
    assert_eq!(Some("Viewer".to_string()), xml_attr_of(&body, "user", "siteRole"));

    user.fullname = Some("Alice Liddell".into());
    user.set_site_role(SiteRole::Viewer);
    transport.respond(
        200,
        ns_body(r#"<user name="alice" fullName="Alice Liddell" siteRole="Viewer"/>"#),
    );
    server.users().update(&mut user).unwrap();
    assert_eq!(Some(SiteRole::Viewer), user.site_role());
    assert_eq!(Some("dd2239f6-ddf1-4107-981a-4cf94e415794"), user.id());
    let body = transport.last_request().body.unwrap();
    assert_eq!(Some("Alice Liddell".to_string()), xml_attr_of(&body, "user", "fullName"));

    transport.respond_empty();
    server.users().remove("dd2239f6-ddf1-4107-981a-4cf94e415794").unwrap();
    assert_eq!(HttpMethod::Delete, transport.last_request().method);
}

#[test]
fn test_groups() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/groups.xml");
    let server = signed_in_server(&transport);

    let (groups, _) = server.groups().list(None).unwrap();
    assert_eq!(2, groups.len());
    assert_eq!("All Users", groups[0].name());
    assert_eq!(Some("local"), groups[0].domain_name());

    let mut group = groups[1].clone();
    transport.respond_with_file("test-files/group_users.xml");
    server.groups().populate_users(&mut group, None).unwrap();
    assert_eq!("alice", group.users().unwrap()[0].name());
    assert_eq!(
        format!("{SITE_URL}/groups/e7833b48-c6f7-47b5-a2a7-36e7dd232758/users"),
        transport.last_request().url
    );

    transport.respond_with_file("test-files/group_add_user.xml");
    let added = server
        .groups()
        .add_user(&group, "5de011f8-5aa9-4d5b-b991-f462c8dd6bb7")
        .unwrap();
    assert_eq!("charlie", added.name());
    let body = transport.last_request().body.unwrap();
    assert_eq!(
        Some("5de011f8-5aa9-4d5b-b991-f462c8dd6bb7".to_string()),
        xml_attr_of(&body, "user", "id")
    );

    transport.respond_empty();
    server
        .groups()
        .remove_user(&group, "5de011f8-5aa9-4d5b-b991-f462c8dd6bb7")
        .unwrap();
    assert_eq!(
        format!(
            "{SITE_URL}/groups/e7833b48-c6f7-47b5-a2a7-36e7dd232758/users/5de011f8-5aa9-4d5b-b991-f462c8dd6bb7"
        ),
        transport.last_request().url
    );

    transport.respond(201, ns_body(r#"<group id="g3" name="Analysts"/>"#));
    let created = server.groups().create(&GroupItem::new("Analysts").unwrap()).unwrap();
    assert_eq!(Some("g3"), created.id());

    transport.respond_empty();
    server.groups().delete("g3").unwrap();
    assert_eq!(format!("{SITE_URL}/groups/g3"), transport.last_request().url);
}

#[test]
fn test_workbooks() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/workbook_get.xml");
    let server = signed_in_server(&transport);

    let mut workbook = server
        .workbooks()
        .get_by_id("3cc6cd06-89ce-4fdc-b935-5294135d6d42")
        .unwrap();
    assert_eq!(Some("SafariSample"), workbook.name());
    assert!(!workbook.show_tabs);
    assert_eq!(Some(1), workbook.size());
    assert_eq!(Some("default"), workbook.project_name());
    assert_eq!(1, workbook.views().unwrap().len());
    assert!(matches!(workbook.connections(), Err(TscError::UnpopulatedProperty(_))));

    transport.respond_with_file("test-files/workbook_views.xml");
    server.workbooks().populate_views(&mut workbook).unwrap();
    assert_eq!(2, workbook.views().unwrap().len());
    assert_eq!(
        format!("{SITE_URL}/workbooks/3cc6cd06-89ce-4fdc-b935-5294135d6d42/views"),
        transport.last_request().url
    );

    transport.respond_with_file("test-files/datasource_connections.xml");
    server.workbooks().populate_connections(&mut workbook).unwrap();
    assert_eq!(2, workbook.connections().unwrap().len());

    transport.respond(200, b"\x89PNG\r\n".to_vec());
    server.workbooks().populate_preview_image(&mut workbook).unwrap();
    assert_eq!(b"\x89PNG\r\n".to_vec(), *workbook.preview_image().unwrap());
    assert_eq!(
        format!("{SITE_URL}/workbooks/3cc6cd06-89ce-4fdc-b935-5294135d6d42/previewImage"),
        transport.last_request().url
    );

    workbook.show_tabs = true;
    workbook.set_tags(HashSet::from(["Safari".to_string()]));
    transport.respond_empty().respond(
        200,
        ns_body(
            r#"<workbook id="3cc6cd06-89ce-4fdc-b935-5294135d6d42" name="SafariSample" showTabs="true"><project id="ee8c6e70-43b6-11e6-af4f-f7b0d8e20760"/></workbook>"#,
        ),
    );
    server.workbooks().update(&mut workbook).unwrap();
    let requests = transport.requests();
    let removal = &requests[requests.len() - 2];
    assert_eq!(HttpMethod::Delete, removal.method);
    assert!(removal.url.ends_with("/tags/Sample"));
    let body = transport.last_request().body.unwrap();
    assert_eq!(Some("true".to_string()), xml_attr_of(&body, "workbook", "showTabs"));
    assert!(workbook.show_tabs);
}

#[test]
fn test_sites() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/sites.xml");
    let server = signed_in_server(&transport);

    let (sites, _) = server.sites().list(None).unwrap();
    assert_eq!(2, sites.len());
    assert_eq!(Some(""), sites[0].content_url());
    assert_eq!(Some(AdminMode::ContentAndUsers), sites[0].admin_mode);
    assert_eq!(Some(25), sites[0].revision_limit());
    assert_eq!(Some(SiteState::Suspended), sites[1].state);
    assert_eq!(Some(true), sites[1].disable_subscriptions);
    assert_eq!("http://tableau.test/api/2.5/sites", transport.last_request().url);

    transport.respond_with_file("test-files/site_get.xml");
    let site = server.sites().get_by_name("Marketing").unwrap();
    assert_eq!(Some("marketing"), site.content_url());
    let request = transport.last_request();
    assert_eq!("http://tableau.test/api/2.5/sites/Marketing", request.url);
    assert_eq!(Some("name"), query_value(&request, "key"));

    transport.respond_with_file("test-files/site_get.xml");
    server.sites().get_by_name("Sales & Ops?").unwrap();
    assert_eq!(
        "http://tableau.test/api/2.5/sites/Sales%20%26%20Ops%3F",
        transport.last_request().url
    );

    let mut new_site = SiteItem::new("Finance", "finance").unwrap();
    new_site.admin_mode = Some(AdminMode::ContentOnly);
    transport.respond(
        201,
        ns_body(r#"<site id="s9" name="Finance" contentUrl="finance" adminMode="ContentOnly"/>"#),
    );
    let created = server.sites().create(&new_site).unwrap();
    assert_eq!(Some("s9"), created.id());
    let body = transport.last_request().body.unwrap();
    assert_eq!(Some("ContentOnly".to_string()), xml_attr_of(&body, "site", "adminMode"));

    transport.respond_empty();
    server.sites().delete("s9").unwrap();
    assert!(server.is_signed_in());
}

#[test]
fn test_deleting_signed_in_site_ends_session() {
    let transport = RecordingTransport::default();
    transport.respond_empty();
    let server = signed_in_server(&transport);

    server.sites().delete("site-id").unwrap();

    assert_eq!("http://tableau.test/api/2.5/sites/site-id", transport.last_request().url);
    assert!(!server.is_signed_in());
    assert!(matches!(server.site_url(), Err(TscError::NotSignedIn)));
}

#[test]
fn test_views_with_usage_statistics() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/views_usage.xml");
    let server = signed_in_server(&transport);

    let (mut views, _) = server.views().with_usage_statistics().list(None).unwrap();
    assert_eq!(Some(7), views[0].total_views());
    assert_eq!(Some(13), views[1].total_views());
    assert_eq!(Some("3cc6cd06-89ce-4fdc-b935-5294135d6d42"), views[0].workbook_id());
    let request = transport.last_request();
    assert_eq!(format!("{SITE_URL}/views"), request.url);
    assert_eq!(Some("true"), query_value(&request, "includeUsageStatistics"));

    transport.respond(200, b"png".to_vec());
    server
        .views()
        .populate_image(&mut views[0], Some(&ImageRequestOptions::high_resolution()))
        .unwrap();
    assert_eq!(b"png".to_vec(), *views[0].image().unwrap());
    let request = transport.last_request();
    assert_eq!(
        format!("{SITE_URL}/views/d79634e1-6063-4ec9-95ff-50acbf609ff5/image"),
        request.url
    );
    assert_eq!(Some("high"), query_value(&request, "resolution"));

    transport.respond(200, b"thumb".to_vec());
    server.views().populate_preview_image(&mut views[0]).unwrap();
    assert_eq!(b"thumb".to_vec(), *views[0].preview_image().unwrap());
    assert_eq!(
        format!(
            "{SITE_URL}/workbooks/3cc6cd06-89ce-4fdc-b935-5294135d6d42/views/d79634e1-6063-4ec9-95ff-50acbf609ff5/previewImage"
        ),
        transport.last_request().url
    );
}

#[test]
fn test_views_list_without_usage_statistics() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/views_usage.xml");
    let server = signed_in_server(&transport);

    server.views().list(None).unwrap();

    assert_eq!(None, query_value(&transport.last_request(), "includeUsageStatistics"));
}

#[test]
fn test_schedules() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/schedules.xml");
    let server = signed_in_server(&transport);

    let (schedules, pagination) = server.schedules().list(None).unwrap();
    assert_eq!(2, pagination.total_available);
    assert_eq!("http://tableau.test/api/2.5/schedules", transport.last_request().url);
    let weekly = &schedules[0];
    assert_eq!("Weekday early mornings", weekly.name());
    assert_eq!(50, weekly.priority());
    assert_eq!(Some(ScheduleState::Active), weekly.state());
    assert_eq!(ScheduleType::Extract, weekly.schedule_type);
    assert_eq!(
        IntervalItem::weekly(
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            vec![Weekday::Mon, Weekday::Wed, Weekday::Fri],
        )
        .unwrap(),
        weekly.interval
    );
    assert_eq!(ExecutionOrder::Serial, schedules[1].execution_order);

    let interval = IntervalItem::hourly(
        NaiveTime::from_hms_opt(2, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        2,
    )
    .unwrap();
    let schedule = ScheduleItem::new(
        "Every two hours",
        40,
        ScheduleType::Extract,
        ExecutionOrder::Parallel,
        interval,
    )
    .unwrap();
    transport.respond(201, body_from_file("test-files/schedule_create.xml"));
    let mut created = server.schedules().create(&schedule).unwrap();
    assert_eq!(Some("5f4e3d2c-1b0a-4f9e-8d7c-6b5a4f3e2d1c"), created.id());
    assert!(created.next_run_at().is_some());
    let body = transport.last_request().body.unwrap();
    assert_eq!(Some("Hourly".to_string()), xml_attr_of(&body, "schedule", "frequency"));
    assert_eq!(Some("22:00:00".to_string()), xml_attr_of(&body, "frequencyDetails", "end"));
    assert_eq!(Some("2".to_string()), xml_attr_of(&body, "interval", "hours"));

    created.set_priority(90).unwrap();
    transport.respond(
        200,
        ns_body(
            r#"<schedule id="5f4e3d2c-1b0a-4f9e-8d7c-6b5a4f3e2d1c" name="Every two hours" priority="90" type="Extract" frequency="Hourly" executionOrder="Parallel" state="Suspended"><frequencyDetails start="02:00:00" end="22:00:00"><intervals><interval hours="2"/></intervals></frequencyDetails></schedule>"#,
        ),
    );
    server.schedules().update(&mut created).unwrap();
    assert_eq!(90, created.priority());
    assert_eq!(Some(ScheduleState::Suspended), created.state());

    transport.respond_empty();
    server
        .schedules()
        .delete("5f4e3d2c-1b0a-4f9e-8d7c-6b5a4f3e2d1c")
        .unwrap();
    assert_eq!(
        "http://tableau.test/api/2.5/schedules/5f4e3d2c-1b0a-4f9e-8d7c-6b5a4f3e2d1c",
        transport.last_request().url
    );
}

#[test]
fn test_tasks() {
    let transport = RecordingTransport::default();
    transport.respond_with_file("test-files/tasks.xml");
    let server = signed_in_server(&transport);

    let (tasks, pagination) = server.tasks().list(None).unwrap();
    assert_eq!(2, tasks.len());
    assert_eq!(2, pagination.total_available);
    assert!(!pagination.has_more());
    assert_eq!(format!("{SITE_URL}/tasks/extractRefreshes"), transport.last_request().url);
    assert_eq!(
        &TaskTarget::Workbook("3cc6cd06-89ce-4fdc-b935-5294135d6d42".into()),
        tasks[0].target()
    );
    assert_eq!(Some("c9cff7f9-309c-4361-99ff-d4ba8c9f5467"), tasks[0].schedule_id());
    assert_eq!(RefreshType::IncrementalRefresh, tasks[1].refresh_type());
    assert_eq!(Some(3), tasks[1].consecutive_failed_count());

    transport.respond_with_file("test-files/schedule_extracts.xml");
    let (extracts, _) = server
        .tasks()
        .get_for_schedule("c9cff7f9-309c-4361-99ff-d4ba8c9f5467", None)
        .unwrap();
    assert_eq!(2, extracts.len());
    assert!(extracts
        .iter()
        .all(|task| task.schedule_id() == Some("c9cff7f9-309c-4361-99ff-d4ba8c9f5467")));
    assert_eq!(60, extracts[1].priority());
    assert_eq!(
        format!("{SITE_URL}/schedules/c9cff7f9-309c-4361-99ff-d4ba8c9f5467/extracts"),
        transport.last_request().url
    );

    transport.respond_with_file("test-files/run_now.xml");
    let job_id = server
        .tasks()
        .run_now("f84901ac-72ad-4f9b-a87e-7a3500402ad6")
        .unwrap();
    assert_eq!("7b6b59a8-ac3c-4d1d-8e9e-f1e2a3b4c5d6", job_id);
    let request = transport.last_request();
    assert_eq!(HttpMethod::Post, request.method);
    assert_eq!(
        format!("{SITE_URL}/tasks/extractRefreshes/f84901ac-72ad-4f9b-a87e-7a3500402ad6/runNow"),
        request.url
    );
}

#[test]
fn test_run_now_without_job_is_malformed() {
    let transport = RecordingTransport::default();
    transport.respond(200, ns_body(""));
    let server = signed_in_server(&transport);

    assert!(matches!(
        server.tasks().run_now("t1"),
        Err(TscError::MalformedResponse(_))
    ));
}

#[test]
fn test_garbage_body_is_malformed_response() {
    let transport = RecordingTransport::default();
    transport.respond(200, "<<not xml");
    let server = signed_in_server(&transport);

    assert!(matches!(
        server.users().list(None),
        Err(TscError::MalformedResponse(_))
    ));
}
