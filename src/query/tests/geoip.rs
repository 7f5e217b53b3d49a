#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::record_batch::RecordBatch;
    use datafusion::prelude::SessionContext;
    use datafusion_common::cast::as_string_array;
    use geoip::test_util::mmdb::write_city_database;
    use geoip::test_util::StubFactory;
    use geoip::test_util::BARE_LOCATION_IP;
    use geoip::test_util::US_IP;
    use geoip::GeoIpFunction;
    use query::error::Result;
    use query::execute;
    use query::register_table;
    use query::session_context;
    use query::table::ip_table;
    use query::GeoIpUdf;
    use query::DEFAULT_TABLE;
    use tempfile::NamedTempFile;
    use tracing_test::traced_test;

    fn context(factory: Arc<StubFactory>) -> Result<SessionContext> {
        let ctx = session_context(GeoIpUdf::new(GeoIpFunction::new(factory)));
        let ips = vec![
            Some(US_IP.to_string()),
            Some("twelve".to_string()),
            None,
            Some(BARE_LOCATION_IP.to_string()),
        ];
        register_table(&ctx, DEFAULT_TABLE, ip_table(ips)?)?;

        Ok(ctx)
    }

    fn values(batches: &[RecordBatch]) -> Vec<Option<String>> {
        batches
            .iter()
            .flat_map(|b| {
                as_string_array(b.column(0).as_ref())
                    .unwrap()
                    .iter()
                    .map(|v| v.map(|v| v.to_string()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[traced_test]
    #[tokio::test]
    async fn country_name() -> Result<()> {
        let db = NamedTempFile::new()?;
        let ctx = context(Arc::new(StubFactory::default()))?;
        let sql = format!(
            "select geoip(ip, 'COUNTRY_NAME', '{}') from {DEFAULT_TABLE}",
            db.path().display()
        );

        let res = execute(&ctx, &sql).await?;
        assert_eq!(
            values(&res),
            vec![s("United States"), None, None, s("United States")]
        );

        Ok(())
    }

    #[tokio::test]
    async fn location_fields() -> Result<()> {
        let db = NamedTempFile::new()?;
        let ctx = context(Arc::new(StubFactory::default()))?;
        let sql = format!(
            "select geoip(ip, 'city', '{0}'), geoip(ip, 'latitude', '{0}') from {DEFAULT_TABLE}",
            db.path().display()
        );

        let res = execute(&ctx, &sql).await?;
        assert_eq!(values(&res), vec![s("Sunnyvale"), None, None, None]);

        let lat = res
            .iter()
            .flat_map(|b| {
                as_string_array(b.column(1).as_ref())
                    .unwrap()
                    .iter()
                    .map(|v| v.map(|v| v.to_string()))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        assert_eq!(lat, vec![s("37.4249"), None, None, s("38.0")]);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_property() -> Result<()> {
        let db = NamedTempFile::new()?;
        let ctx = context(Arc::new(StubFactory::default()))?;
        let sql = format!(
            "select geoip(ip, 'BOGUS', '{}') from {DEFAULT_TABLE}",
            db.path().display()
        );

        let res = execute(&ctx, &sql).await?;
        assert_eq!(values(&res), vec![None, None, None, None]);

        Ok(())
    }

    #[tokio::test]
    async fn integer_addresses() -> Result<()> {
        let db = NamedTempFile::new()?;
        let ctx = session_context(GeoIpUdf::new(GeoIpFunction::new(Arc::new(
            StubFactory::default(),
        ))));
        let sql = format!(
            "select geoip(column1, 'COUNTRY_CODE', '{}') from (values (3518991304), (1), (-1))",
            db.path().display()
        );

        let res = execute(&ctx, &sql).await?;
        assert_eq!(values(&res), vec![s("US"), None, None]);

        Ok(())
    }

    #[tokio::test]
    async fn database_is_opened_once() -> Result<()> {
        let first = NamedTempFile::new()?;
        let dir = tempfile::tempdir()?;
        let factory = Arc::new(StubFactory::default());
        let ctx = context(factory.clone())?;

        let sql = format!(
            "select geoip(ip, 'COUNTRY_CODE', '{}') from {DEFAULT_TABLE}",
            first.path().display()
        );
        execute(&ctx, &sql).await?;

        // the second path doesn't exist, the open handle is used regardless
        let sql = format!(
            "select geoip(ip, 'COUNTRY_CODE', '{}') from {DEFAULT_TABLE}",
            dir.path().join("missing.mmdb").display()
        );
        let res = execute(&ctx, &sql).await?;
        assert_eq!(values(&res), vec![s("US"), None, None, s("US")]);

        assert_eq!(factory.opened(), vec![first.path().to_path_buf()]);

        Ok(())
    }

    #[tokio::test]
    async fn missing_database() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("GeoIP.mmdb");
        let ctx = context(Arc::new(StubFactory::default()))?;
        let sql = format!(
            "select geoip(ip, 'COUNTRY_NAME', '{}') from {DEFAULT_TABLE}",
            path.display()
        );

        let err = execute(&ctx, &sql).await.unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn wrong_argument_count() -> Result<()> {
        let ctx = context(Arc::new(StubFactory::default()))?;

        for sql in [
            format!("select geoip(ip, 'CITY') from {DEFAULT_TABLE}"),
            format!("select geoip(ip, 'CITY', 'a', 'b') from {DEFAULT_TABLE}"),
        ] {
            let err = execute(&ctx, &sql).await.unwrap_err();
            assert!(err.to_string().contains("accepts 3 arguments"), "{err}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn wrong_argument_type() -> Result<()> {
        let ctx = context(Arc::new(StubFactory::default()))?;
        let err = execute(
            &ctx,
            &format!("select geoip(ip, 1.5, 'GeoIP.mmdb') from {DEFAULT_TABLE}"),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("argument 1"), "{err}");

        Ok(())
    }

    #[tokio::test]
    async fn maxmind_database() -> Result<()> {
        let db = NamedTempFile::new()?;
        write_city_database(db.path());

        let ctx = session_context(GeoIpUdf::maxmind());
        let ips = vec![Some(US_IP.to_string()), Some("twelve".to_string())];
        register_table(&ctx, DEFAULT_TABLE, ip_table(ips)?)?;

        let sql = format!(
            "select geoip(ip, 'COUNTRY_NAME', '{0}'), geoip(ip, 'DMA_CODE', '{0}') from {DEFAULT_TABLE}",
            db.path().display()
        );
        let res = execute(&ctx, &sql).await?;
        assert_eq!(values(&res), vec![s("United States"), None]);

        let dma = res
            .iter()
            .flat_map(|b| {
                as_string_array(b.column(1).as_ref())
                    .unwrap()
                    .iter()
                    .map(|v| v.map(|v| v.to_string()))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        assert_eq!(dma, vec![s("807"), None]);

        Ok(())
    }
}
