// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UrlResponses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UrlResponses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UrlResponses::Url).text().not_null())
                    .col(ColumnDef::new(UrlResponses::Response).blob().not_null())
                    .col(
                        ColumnDef::new(UrlResponses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups by source URL
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_url_responses_url")
                    .table(UrlResponses::Table)
                    .col(UrlResponses::Url)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Dropping the table also drops idx_url_responses_url
        manager
            .drop_table(Table::drop().table(UrlResponses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UrlResponses {
    Table,
    Id,
    Url,
    Response,
    CreatedAt,
}
