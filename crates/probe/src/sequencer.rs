//! Dependent probe sequencer — one realistic workflow as a fixed directed
//! sequence of create/use/delete steps. Every step is gated on the captures
//! of the steps before it: a missing dependency skips the step outright, it
//! never issues the request and never records a failure for it.

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::chain::{EntityChain, Resource};
use crate::envelope;
use crate::executor::{HttpMethod, Transport};
use crate::result::ProbeStatus;
use crate::session::ProbeSession;

/// Run the full dependent chain:
/// client -> site -> site post -> guard -> shift types -> assignment ->
/// check-in -> check-out -> cancel assignment -> delete site post.
pub fn run_chain<T: Transport>(session: &mut ProbeSession<'_, T>) -> EntityChain {
    let mut chain = EntityChain::new();
    // Per-run suffix keeps created names and emails unique across runs.
    let stamp = Utc::now().timestamp();

    // 1. Client - the root of the chain.
    create_step(
        session,
        &mut chain,
        Resource::Client,
        "/clients",
        json!({
            "name": format!("QA Test Client {stamp}"),
            "status": "ACTIVE",
        }),
    );

    // 2. Site, referencing the client.
    if chain.satisfied(&[Resource::Client]) {
        let payload = json!({
            "clientAccountId": chain.id_value(Resource::Client),
            "name": format!("QA Test Site {stamp}"),
            "address": "123 Test Street",
            "status": "ACTIVE",
        });
        create_step(session, &mut chain, Resource::Site, "/sites", payload);
    } else {
        skip(Resource::Site, Resource::Client);
    }

    // 3. Site post, referencing the site.
    if chain.satisfied(&[Resource::Site]) {
        let payload = json!({
            "siteId": chain.id_value(Resource::Site),
            "postName": format!("QA Gate {stamp}"),
            "description": "QA Test Post",
            "requiredGuards": 1,
        });
        create_step(session, &mut chain, Resource::SitePost, "/site-posts", payload);
    } else {
        skip(Resource::SitePost, Resource::Site);
    }

    // 4. Guard - independent of the client branch.
    create_step(
        session,
        &mut chain,
        Resource::Guard,
        "/guards",
        json!({
            "email": format!("qaguard{stamp}@test.com"),
            "password": "Test@123",
            "fullName": format!("QA Guard {stamp}"),
            "phone": "1234567890",
            "employeeCode": format!("QAG{stamp}"),
            "firstName": "QA",
            "lastName": "Guard",
            "baseSalary": 25000.00,
            "perDayRate": 1000.00,
            "overtimeRate": 150.00,
        }),
    );

    // 5. Shift types - best effort, observed raw. Any failure here leaves
    // the shift type absent and only the assignment step is affected.
    fetch_shift_type(session, &mut chain);

    // 6. Assignment, needing the guard, the site post, and a shift type.
    if chain.satisfied(&[Resource::Guard, Resource::SitePost, Resource::ShiftType]) {
        let today = Utc::now().date_naive();
        let payload = json!({
            "guardId": chain.id_value(Resource::Guard),
            "sitePostId": chain.id_value(Resource::SitePost),
            "shiftTypeId": chain.id_value(Resource::ShiftType),
            "effectiveFrom": today.to_string(),
            "effectiveTo": (today + Duration::days(30)).to_string(),
        });
        create_step(session, &mut chain, Resource::Assignment, "/assignments", payload);
    } else {
        debug!("skipping assignment creation, dependencies incomplete");
    }

    // 7. Check-in. A passing check-in is recorded as bare presence; the
    // attendance API returns no identifier we need downstream.
    if chain.satisfied(&[Resource::Guard, Resource::Assignment]) {
        let payload = json!({ "guardId": chain.id_value(Resource::Guard) });
        let status = session.probe("/attendance/check-in", HttpMethod::Post, true, Some(payload));
        if status == ProbeStatus::Pass {
            chain.mark_present(Resource::Attendance);
        }
    } else {
        debug!("skipping check-in, no assignment captured");
    }

    // 8. Check-out, only after a successful check-in.
    if chain.satisfied(&[Resource::Attendance]) {
        let payload = json!({ "guardId": chain.id_value(Resource::Guard) });
        session.probe("/attendance/check-out", HttpMethod::Post, true, Some(payload));
    }

    // 9. Cancel the assignment.
    if let Some(id) = chain.path_id(Resource::Assignment) {
        session.probe(
            &format!("/assignments/{id}/cancel"),
            HttpMethod::Post,
            true,
            None,
        );
    }

    // 10. Delete the site post.
    if let Some(id) = chain.path_id(Resource::SitePost) {
        session.probe(&format!("/site-posts/{id}"), HttpMethod::Delete, true, None);
    }

    chain
}

/// One creating step: a classifying probe for the report, then - only on a
/// clean pass - a raw re-request to capture the created identifier. An
/// unextractable id leaves the chain entry absent; downstream gates treat
/// that as "dependency not satisfied".
fn create_step<T: Transport>(
    session: &mut ProbeSession<'_, T>,
    chain: &mut EntityChain,
    resource: Resource,
    path: &str,
    payload: Value,
) {
    let status = session.probe(path, HttpMethod::Post, true, Some(payload.clone()));
    if status != ProbeStatus::Pass {
        return;
    }

    match session.raw(path, HttpMethod::Post, Some(payload)) {
        Some(body) => match envelope::created_id(&body) {
            Some(id) => {
                info!(resource = resource.label(), %id, "captured created id");
                chain.record_id(resource, id);
            }
            None => warn!(
                resource = resource.label(),
                "create response carried no id, dependent steps will be skipped"
            ),
        },
        None => warn!(
            resource = resource.label(),
            "id extraction request failed, dependent steps will be skipped"
        ),
    }
}

fn fetch_shift_type<T: Transport>(session: &ProbeSession<'_, T>, chain: &mut EntityChain) {
    match session.raw("/assignments/shift-types", HttpMethod::Get, None) {
        Some(body) => match envelope::first_shift_type_id(&body) {
            Some(id) => {
                info!(%id, "using existing shift type");
                chain.record_id(Resource::ShiftType, id);
            }
            None => debug!("no shift types available"),
        },
        None => debug!("shift type lookup failed"),
    }
}

fn skip(skipped: Resource, missing: Resource) {
    debug!(
        step = skipped.label(),
        missing = missing.label(),
        "skipping step, dependency not captured"
    );
}
