mod mock_entropy;
