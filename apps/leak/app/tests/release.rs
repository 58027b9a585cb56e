mod common;

use common::{TestNetwork, DESCRIPTION, MESSAGE};
use leak_app::{ClientError, ReleaseClient};
use leak_host::{HostError, ServiceError};
use leak_types::{methods, ChangeReleaseTime, MessageError, ReleaseParams, Timestamp};
use testresult::TestResult;

async fn deploy(net: &TestNetwork, release_time: Timestamp) -> Result<ReleaseClient, ClientError> {
    ReleaseClient::deploy(
        &net.author,
        ReleaseParams {
            description: DESCRIPTION.to_owned(),
            message: MESSAGE.to_owned(),
            message_release_time: release_time,
        },
    )
    .await
}

#[test_log::test(tokio::test)]
async fn receive_message_released_in_the_past() -> TestResult {
    let net = TestNetwork::start();
    let past = deploy(&net, net.time_in_past()).await?;
    assert_eq!(past.message().await?, MESSAGE);
    let as_viewer = ReleaseClient::connect(past.address(), &net.viewer).await?;
    assert_eq!(as_viewer.message().await?, MESSAGE);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn does_not_receive_message_released_in_the_future() -> TestResult {
    let net = TestNetwork::start();
    let future = deploy(&net, net.time_in_future()).await?;
    let err = future.message().await.unwrap_err();
    assert_eq!(err.to_string(), "Message is not yet released.");
    assert!(err
        .as_message_error()
        .is_some_and(|err| err.is_recoverable()));

    net.clock.advance(3600);
    assert_eq!(future.message().await?, MESSAGE);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn accepts_legacy_release_time_field() -> TestResult {
    let net = TestNetwork::start();
    let params = format!(
        r#"{{"description":"{DESCRIPTION}","message":"{MESSAGE}","messageBecomesPublicTime":{}}}"#,
        net.time_in_past()
    );
    let handle = net
        .author
        .deploy("release", params.into_bytes())
        .await?;
    let release = ReleaseClient::connect(handle.address(), &net.viewer).await?;
    assert_eq!(release.message().await?, MESSAGE);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn release_time_cannot_be_changed() -> TestResult {
    let net = TestNetwork::start();
    let future = deploy(&net, net.time_in_future()).await?;
    let handle = net.author.connect(future.address()).await?;

    let args = serde_json::to_vec(&ChangeReleaseTime {
        new_time: net.time_in_past(),
    })?;
    let err = net
        .author
        .call(&handle, methods::CHANGE_RELEASE_TIME, args)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        HostError::Service(ServiceError::UnknownMethod(
            methods::CHANGE_RELEASE_TIME.to_owned()
        ))
    );
    assert_eq!(
        future.message().await.unwrap_err().as_message_error(),
        Some(MessageError::NotYetReleased)
    );
    Ok(())
}

#[test_log::test(tokio::test)]
async fn malformed_parameters_are_rejected_at_deployment() -> TestResult {
    let net = TestNetwork::start();
    let err = net
        .author
        .deploy("release", br#"{"message":"no release time"}"#.to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, HostError::Service(ServiceError::Deser(_))));
    Ok(())
}
