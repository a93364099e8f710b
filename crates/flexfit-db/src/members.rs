use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use flexfit_data::{
    Delete, Insert, Member, MemberFilter, MemberStatus, Query, Retrieve, Update,
};

use crate::{
    results::{Id, QueryError, ValidationError},
    Connection,
};

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                name,
                mobile,
                join_date,
                last_billed_date,
                photo_path,
                status
            FROM members
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(name) = filter.name.clone() {
            qry.push(" AND name LIKE ").push_bind(format!("%{}%", name));
        }
        if let Some(status) = filter.status {
            qry.push(" AND status = ").push_bind(status);
        }

        let members: Vec<Member> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Member> for Connection {
    type Key = u32;
    async fn retrieve(&self, member_id: Self::Key) -> Result<Member> {
        let filter = MemberFilter {
            id: Some(member_id),
            ..Default::default()
        };
        let member = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(member)
    }
}

#[async_trait]
impl Insert<Member> for Connection {
    /// Insert a member. Name and mobile are required; the
    /// original silently dropped such adds, here they fail.
    async fn insert(&self, member: Member) -> Result<Member> {
        if member.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        if member.mobile.trim().is_empty() {
            return Err(ValidationError::EmptyField("mobile").into());
        }

        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO members (
                    name,
                    mobile,
                    join_date,
                    last_billed_date,
                    photo_path,
                    status
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&member.name)
                .push_bind(&member.mobile)
                .push_bind(member.join_date)
                .push_bind(member.last_billed_date)
                .push_bind(&member.photo_path)
                .push_bind(member.status);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        log::debug!("inserted member {}", insert.id);
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Member> for Connection {
    /// Update member
    async fn update(&self, member: Member) -> Result<Member> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE members SET")
                .push(" name = ")
                .push_bind(&member.name)
                .push(", mobile = ")
                .push_bind(&member.mobile)
                .push(", join_date = ")
                .push_bind(member.join_date)
                .push(", last_billed_date = ")
                .push_bind(member.last_billed_date)
                .push(", photo_path = ")
                .push_bind(&member.photo_path)
                .push(", status = ")
                .push_bind(member.status)
                .push(" WHERE id = ")
                .push_bind(member.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(member.id).await
    }
}

#[async_trait]
impl Delete<Member> for Connection {
    /// Delete member. Payment history rows referencing the
    /// member are kept (audit trail).
    async fn delete(&self, member: Member) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM members WHERE id = ")
            .push_bind(member.id)
            .build()
            .execute(&mut *conn)
            .await?;
        log::debug!("deleted member {}", member.id);
        Ok(())
    }
}

impl Connection {
    /// Set the membership status for a member.
    pub async fn set_status(&self, member_id: u32, status: MemberStatus) -> Result<Member> {
        let mut member: Member = self.retrieve(member_id).await?;
        member.status = status;
        self.update(member).await
    }
}
