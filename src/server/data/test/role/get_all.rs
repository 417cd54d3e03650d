use super::*;

/// Tests role ordering.
///
/// Expected: roles ordered by level ascending, then by name
#[tokio::test]
async fn orders_by_level_then_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::role::RoleFactory::new(db).name("zeta").level(1).build().await?;
    factory::role::RoleFactory::new(db).name("alpha").level(2).build().await?;
    factory::role::RoleFactory::new(db).name("beta").level(1).build().await?;

    let names: Vec<String> = RoleRepository::new(db)
        .get_all()
        .await?
        .into_iter()
        .map(|role| role.name)
        .collect();

    assert_eq!(names, vec!["beta", "zeta", "alpha"]);

    Ok(())
}
